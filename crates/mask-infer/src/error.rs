use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// The model file could not be opened or mapped.
    Io(String),
    /// The runtime rejected the model bytes.
    ModelLoad(String),
    /// The runtime failed while running inference.
    Backend(String),
    Shape(String),
    ShapeMismatch { expected: String, got: String },
    UnsupportedDevice(Device),
    UnknownBackend(String),
    AlreadyClosed,
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::Shape(msg) => write!(f, "shape error: {msg}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::UnknownBackend(name) => write!(f, "unknown backend: {name}"),
            InferError::AlreadyClosed => write!(f, "classifier already closed"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}
