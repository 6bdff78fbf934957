use crate::{
    Backend, ClassOutput, ClassifierConfig, FloatRgbPacker, InferError, ModelBytes, ModelSource,
    PixelPacker, Session, TensorBuffer, packer::pack_frame,
};
use mask_image::Frame;
use std::{
    fmt,
    time::{Duration, Instant},
};

const UNINITIALIZED_MESSAGE: &str = "Uninitialized Classifier.";

enum ModelState {
    Uninitialized,
    Ready(Box<dyn Session>),
    Closed,
}

/// Lifecycle of a `MaskClassifier`, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    Uninitialized,
    Ready,
    Closed,
}

/// Result of one `classify` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No model was loaded; inference was skipped.
    Uninitialized,
    /// Inference ran and took `elapsed`.
    Completed { elapsed: Duration },
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Uninitialized => write!(f, "{UNINITIALIZED_MESSAGE}"),
            Classification::Completed { elapsed } => write!(f, "{}ms", elapsed.as_millis()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Mask,
    NoMask,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Mask => write!(f, "mask"),
            Verdict::NoMask => write!(f, "no mask"),
        }
    }
}

/// Two-class mask classifier owning one model session and one input buffer.
///
/// `classify` takes `&mut self`: an instance belongs to a single frame loop.
pub struct MaskClassifier {
    config: ClassifierConfig,
    state: ModelState,
    packer: Box<dyn PixelPacker>,
    buffer: TensorBuffer,
    output: ClassOutput,
    prob_mask: f32,
    prob_non_mask: f32,
}

impl MaskClassifier {
    /// Load `model` through `backend` and allocate the input buffer.
    ///
    /// # Errors
    ///
    /// `InferError::Shape` if the configured geometry is empty or too large,
    /// `InferError::Io` if the model file cannot be opened or mapped,
    /// `InferError::ModelLoad` if the backend rejects it.
    pub fn new(
        backend: &dyn Backend,
        model: ModelSource,
        config: ClassifierConfig,
    ) -> Result<Self, InferError> {
        Self::with_packer(backend, model, config, Box::new(FloatRgbPacker))
    }

    pub fn with_packer(
        backend: &dyn Backend,
        model: ModelSource,
        config: ClassifierConfig,
        packer: Box<dyn PixelPacker>,
    ) -> Result<Self, InferError> {
        let mut classifier = Self::unloaded(config, packer)?;
        let bytes = ModelBytes::load(model)?;
        let session = backend.load_model(&bytes)?;
        classifier.state = ModelState::Ready(session);
        log::info!(
            "Created a {} mask classifier ({} input, {} byte buffer, mapped: {})",
            backend.name(),
            classifier.config.image_size(),
            classifier.buffer.capacity(),
            bytes.is_mapped()
        );
        Ok(classifier)
    }

    /// A classifier without a model. `classify` returns `Classification::Uninitialized`.
    ///
    /// # Errors
    ///
    /// `InferError::Shape` if the configured geometry is empty or too large
    /// to allocate.
    pub fn uninitialized(config: ClassifierConfig) -> Result<Self, InferError> {
        let buffer = TensorBuffer::try_new(config.image_size(), config.bytes_per_channel())?;
        Ok(Self {
            config,
            state: ModelState::Uninitialized,
            packer: Box::new(FloatRgbPacker),
            buffer,
            output: [[0.0; 2]; 1],
            prob_mask: 0.0,
            prob_non_mask: 0.0,
        })
    }

    fn unloaded(
        config: ClassifierConfig,
        packer: Box<dyn PixelPacker>,
    ) -> Result<Self, InferError> {
        let mut classifier = Self::uninitialized(config)?;
        if packer.bytes_per_channel() != classifier.config.bytes_per_channel() {
            return Err(InferError::ShapeMismatch {
                expected: format!(
                    "{} bytes per channel",
                    classifier.config.bytes_per_channel()
                ),
                got: format!("packer writing {} bytes per channel", packer.bytes_per_channel()),
            });
        }
        classifier.packer = packer;
        Ok(classifier)
    }

    /// Classify one frame of exactly the configured size.
    ///
    /// Without a loaded model (never loaded, or closed) this logs and returns
    /// `Classification::Uninitialized` instead of failing. On success the raw
    /// outputs are available through `prob_mask` and `prob_non_mask`.
    pub fn classify(&mut self, frame: &Frame) -> Result<Classification, InferError> {
        let session = match &mut self.state {
            ModelState::Ready(session) => session,
            ModelState::Uninitialized | ModelState::Closed => {
                log::error!("Image classifier has not been initialized; skipped.");
                return Ok(Classification::Uninitialized);
            }
        };

        pack_frame(frame, self.packer.as_ref(), &mut self.buffer)?;

        let start = Instant::now();
        session.run(&self.buffer, &mut self.output)?;
        let elapsed = start.elapsed();
        log::debug!("Time cost to run model inference: {}ms", elapsed.as_millis());

        self.prob_mask = self.output[0][0];
        self.prob_non_mask = self.output[0][1];
        log::debug!("Inference result: {:?}", self.output);

        Ok(Classification::Completed { elapsed })
    }

    /// Release the model. The classifier stays usable but only returns the sentinel.
    ///
    /// # Errors
    ///
    /// `InferError::AlreadyClosed` on a second call.
    pub fn close(&mut self) -> Result<(), InferError> {
        match std::mem::replace(&mut self.state, ModelState::Closed) {
            ModelState::Closed => Err(InferError::AlreadyClosed),
            ModelState::Ready(session) => {
                drop(session);
                log::info!("Mask classifier closed");
                Ok(())
            }
            ModelState::Uninitialized => Ok(()),
        }
    }

    pub fn state(&self) -> ClassifierState {
        match self.state {
            ModelState::Uninitialized => ClassifierState::Uninitialized,
            ModelState::Ready(_) => ClassifierState::Ready,
            ModelState::Closed => ClassifierState::Closed,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ClassifierState::Ready
    }

    /// Raw "mask" score from the last completed inference.
    pub fn prob_mask(&self) -> f32 {
        self.prob_mask
    }

    /// Raw "non-mask" score from the last completed inference.
    pub fn prob_non_mask(&self) -> f32 {
        self.prob_non_mask
    }

    /// Whichever class scored higher on the last inference; ties count as `Mask`.
    pub fn verdict(&self) -> Verdict {
        if self.prob_mask >= self.prob_non_mask {
            Verdict::Mask
        } else {
            Verdict::NoMask
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TensorBuffer {
        &self.buffer
    }
}
