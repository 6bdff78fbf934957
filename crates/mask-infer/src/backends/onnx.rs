use crate::{Backend, ClassOutput, Device, InferError, ModelBytes, Session, TensorBuffer};
use ndarray::{ArrayView, IxDyn};
use ort::{inputs, session::Session as OrtSession, value::TensorRef};

/// ONNX Runtime backend.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> Device {
        self.device
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: &ModelBytes) -> Result<Box<dyn Session>, InferError> {
        let builder = OrtSession::builder().map_err(|e| {
            InferError::Backend(format!("failed to create session builder: {}", e))
        })?;

        let builder = match self.device {
            Device::Cpu => {
                log::info!("[onnx] Using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                log::info!("[onnx] Using CUDA execution provider (device_id={})", device_id);
                builder
                    .with_execution_providers([CUDAExecutionProvider::default()
                        .with_device_id(device_id)
                        .build()])
                    .map_err(|_| InferError::UnsupportedDevice(self.device))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(self.device));
            }
        };

        let session = builder
            .commit_from_memory(model)
            .map_err(|e| InferError::ModelLoad(format!("failed to load model: {}", e)))?;

        Ok(Box::new(OnnxSession {
            session,
            input: Vec::new(),
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    // f32 view of the tensor buffer, reused across frames
    input: Vec<f32>,
}

impl Session for OnnxSession {
    fn run(&mut self, input: &TensorBuffer, output: &mut ClassOutput) -> Result<(), InferError> {
        input.read_f32_into(&mut self.input)?;
        let view = ArrayView::from_shape(IxDyn(&input.shape()), &self.input)
            .map_err(|e| InferError::Shape(format!("failed to shape input: {}", e)))?;
        let tensor = TensorRef::from_array_view(view)
            .map_err(|e| InferError::Backend(format!("failed to create tensor ref: {}", e)))?;

        let outputs = self
            .session
            .run(inputs![tensor])
            .map_err(|e| InferError::Backend(format!("inference failed: {}", e)))?;

        let scores = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| InferError::Backend(format!("output is not f32: {}", e)))?;
        *output = first_two(scores.iter().copied())?;
        Ok(())
    }
}

/// The first two values of a model output, as `[[mask, non_mask]]`.
pub fn first_two(mut values: impl Iterator<Item = f32>) -> Result<ClassOutput, InferError> {
    match (values.next(), values.next()) {
        (Some(mask), Some(non_mask)) => Ok([[mask, non_mask]]),
        _ => Err(InferError::Shape(
            "model output has fewer than 2 values".to_string(),
        )),
    }
}
