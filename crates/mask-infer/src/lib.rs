//! Mask / no-mask classification of camera frames.
//!
//! A `MaskClassifier` owns one model `Session` and one fixed-size
//! `TensorBuffer`. Each frame is packed into the buffer as raw RGB floats,
//! run through the model, and the two raw output scores are kept as
//! `prob_mask` / `prob_non_mask`.

pub mod backend;
pub mod backendregistry;
pub mod backends;
pub mod buffer;
pub mod classifier;
pub mod config;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod packer;
pub mod session;

pub use backend::Backend;
pub use backendregistry::{create_registry, BackendRegistry};
pub use buffer::TensorBuffer;
pub use classifier::{Classification, ClassifierState, MaskClassifier, Verdict};
pub use config::ClassifierConfig;
pub use device::Device;
pub use error::InferError;
pub use modelsource::{ModelBytes, ModelSource};
pub use packer::{pack_frame, FloatRgbPacker, PixelPacker};
pub use session::{ClassOutput, Session};
