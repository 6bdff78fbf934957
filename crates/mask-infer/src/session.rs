use crate::{InferError, TensorBuffer};

/// Two raw scores: `[0][0]` is "mask", `[0][1]` is "non-mask".
pub type ClassOutput = [[f32; 2]; 1];

/// A loaded model that can run a forward pass.
///
/// `input` holds whatever channel width the classifier was configured with;
/// a session that only reads `f32` channels reports other widths as
/// `InferError::Shape` from `run`.
pub trait Session: Send {
    fn run(&mut self, input: &TensorBuffer, output: &mut ClassOutput) -> Result<(), InferError>;
}
