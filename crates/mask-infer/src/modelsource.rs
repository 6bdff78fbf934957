use crate::InferError;
use memmap2::Mmap;
use std::{fs::File, ops::Deref, path::PathBuf};

/// Where the serialized model comes from.
#[derive(Debug, Clone)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Model bytes held for the lifetime of the runtime session's creation.
///
/// Files are memory-mapped read-only instead of copied.
pub enum ModelBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl ModelBytes {
    pub fn load(source: ModelSource) -> Result<Self, InferError> {
        match source {
            ModelSource::File(path) => {
                let file = File::open(&path).map_err(|e| {
                    InferError::Io(format!("failed to open model {}: {e}", path.display()))
                })?;
                // SAFETY: the mapping is read-only and the model file is an
                // application asset that is not modified while mapped.
                let mmap = unsafe { Mmap::map(&file) }.map_err(|e| {
                    InferError::Io(format!("failed to memory-map model {}: {e}", path.display()))
                })?;
                Ok(ModelBytes::Mapped(mmap))
            }
            ModelSource::Memory(bytes) => Ok(ModelBytes::Owned(bytes)),
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, ModelBytes::Mapped(_))
    }
}

impl Deref for ModelBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            ModelBytes::Mapped(mmap) => mmap,
            ModelBytes::Owned(bytes) => bytes,
        }
    }
}
