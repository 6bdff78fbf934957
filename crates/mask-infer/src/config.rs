use mask_base::Vec2;

/// Input geometry of the classifier model.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierConfig {
    width: usize,
    height: usize,
    bytes_per_channel: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            width: 224,
            height: 224,
            // one f32 per color channel
            bytes_per_channel: 4,
        }
    }
}

impl ClassifierConfig {
    /// Set the model input width in pixels.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the model input height in pixels.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set the number of bytes used to store one color channel value.
    pub fn with_bytes_per_channel(mut self, bytes_per_channel: usize) -> Self {
        self.bytes_per_channel = bytes_per_channel;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_channel(&self) -> usize {
        self.bytes_per_channel
    }

    pub fn image_size(&self) -> Vec2<usize> {
        Vec2::new(self.width, self.height)
    }
}
