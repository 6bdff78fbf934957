use crate::{InferError, ModelBytes, Session};

/// An inference runtime able to turn model bytes into a `Session`.
pub trait Backend {
    fn name(&self) -> &str;
    fn load_model(&self, model: &ModelBytes) -> Result<Box<dyn Session>, InferError>;
}
