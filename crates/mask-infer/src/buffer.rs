use crate::InferError;
use mask_base::Vec2;

/// Fixed-capacity, native-endian byte buffer laid out as the model input.
///
/// Capacity is `BATCH * width * height * CHANNELS * bytes_per_channel` and never
/// changes. Writes advance a cursor; `rewind` moves it back to the start so the
/// next frame overwrites the previous one in place.
#[derive(Debug, Clone)]
pub struct TensorBuffer {
    bytes: Box<[u8]>,
    position: usize,
    size: Vec2<usize>,
    bytes_per_channel: usize,
}

impl TensorBuffer {
    pub const BATCH: usize = 1;
    pub const CHANNELS: usize = 3;

    /// # Panics
    ///
    /// If the capacity overflows `usize`. Use `try_new` for unvalidated sizes.
    pub fn new(size: Vec2<usize>, bytes_per_channel: usize) -> Self {
        let capacity = Self::BATCH * size.area() * Self::CHANNELS * bytes_per_channel;
        Self::with_capacity(size, bytes_per_channel, capacity)
    }

    /// Like `new`, but rejects empty geometry and capacity overflow with
    /// `InferError::Shape`.
    pub fn try_new(size: Vec2<usize>, bytes_per_channel: usize) -> Result<Self, InferError> {
        if size.x == 0 || size.y == 0 || bytes_per_channel == 0 {
            return Err(InferError::Shape(format!(
                "empty tensor buffer: {} input with {} bytes per channel",
                size, bytes_per_channel
            )));
        }
        let capacity = Self::BATCH
            .checked_mul(size.x)
            .and_then(|n| n.checked_mul(size.y))
            .and_then(|n| n.checked_mul(Self::CHANNELS))
            .and_then(|n| n.checked_mul(bytes_per_channel))
            .ok_or_else(|| {
                InferError::Shape(format!(
                    "tensor buffer too large: {} input with {} bytes per channel",
                    size, bytes_per_channel
                ))
            })?;
        Ok(Self::with_capacity(size, bytes_per_channel, capacity))
    }

    fn with_capacity(size: Vec2<usize>, bytes_per_channel: usize, capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity].into_boxed_slice(),
            position: 0,
            size,
            bytes_per_channel,
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn bytes_per_channel(&self) -> usize {
        self.bytes_per_channel
    }

    /// `[batch, height, width, channels]`.
    pub fn shape(&self) -> [usize; 4] {
        [Self::BATCH, self.size.y, self.size.x, Self::CHANNELS]
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Append raw bytes at the cursor.
    pub fn put(&mut self, data: &[u8]) -> Result<(), InferError> {
        if data.len() > self.remaining() {
            return Err(InferError::Shape(format!(
                "buffer overflow: {} bytes written at position {} of {}",
                data.len(),
                self.position,
                self.capacity()
            )));
        }
        self.bytes[self.position..self.position + data.len()].copy_from_slice(data);
        self.position += data.len();
        Ok(())
    }

    /// Append one `f32` in native byte order.
    pub fn put_f32(&mut self, value: f32) -> Result<(), InferError> {
        self.put(&value.to_ne_bytes())
    }

    /// The `index`-th `f32` of the buffer, read in native byte order.
    pub fn read_f32(&self, index: usize) -> Option<f32> {
        let start = index.checked_mul(4)?;
        let chunk = self.bytes.get(start..start.checked_add(4)?)?;
        Some(f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    /// Decode the whole buffer as `f32` values into `out`, replacing its contents.
    pub fn read_f32_into(&self, out: &mut Vec<f32>) -> Result<(), InferError> {
        if self.bytes_per_channel != 4 {
            return Err(InferError::Shape(format!(
                "cannot read {}-byte channels as f32",
                self.bytes_per_channel
            )));
        }
        out.clear();
        out.extend(
            self.bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]])),
        );
        Ok(())
    }

    pub fn to_f32_vec(&self) -> Result<Vec<f32>, InferError> {
        let mut out = Vec::with_capacity(self.bytes.len() / 4);
        self.read_f32_into(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_follows_geometry() {
        let buffer = TensorBuffer::new(Vec2::new(224, 224), 4);
        assert_eq!(buffer.capacity(), 224 * 224 * 3 * 4);
        assert_eq!(buffer.shape(), [1, 224, 224, 3]);
    }

    #[test]
    fn test_put_advances_and_rewind_resets() {
        let mut buffer = TensorBuffer::new(Vec2::new(1, 1), 4);
        buffer.put_f32(1.5).unwrap();
        assert_eq!(buffer.position(), 4);
        buffer.rewind();
        assert_eq!(buffer.position(), 0);
        assert_eq!(buffer.read_f32(0), Some(1.5));
    }

    #[test]
    fn test_put_past_capacity_fails_without_writing() {
        let mut buffer = TensorBuffer::new(Vec2::new(1, 1), 1);
        buffer.put(&[1, 2]).unwrap();
        assert!(buffer.put(&[3, 4]).is_err());
        assert_eq!(buffer.position(), 2);
        assert_eq!(buffer.as_bytes(), &[1, 2, 0]);
    }

    #[test]
    fn test_read_f32_out_of_range() {
        let buffer = TensorBuffer::new(Vec2::new(1, 1), 4);
        assert_eq!(buffer.read_f32(2), Some(0.0));
        assert_eq!(buffer.read_f32(3), None);
        assert_eq!(buffer.read_f32(usize::MAX), None);
    }

    #[test]
    fn test_try_new_rejects_empty_geometry() {
        for (w, h, bpc) in [(0, 224, 4), (224, 0, 4), (224, 224, 0)] {
            let result = TensorBuffer::try_new(Vec2::new(w, h), bpc);
            assert!(matches!(result, Err(InferError::Shape(_))));
        }
    }

    #[test]
    fn test_try_new_rejects_overflow() {
        let result = TensorBuffer::try_new(Vec2::new(usize::MAX / 2, 224), 4);
        assert!(matches!(result, Err(InferError::Shape(_))));
    }

    #[test]
    fn test_try_new_matches_new() {
        let buffer = TensorBuffer::try_new(Vec2::new(7, 3), 2).unwrap();
        assert_eq!(buffer.capacity(), TensorBuffer::new(Vec2::new(7, 3), 2).capacity());
    }

    #[test]
    fn test_read_f32_into_rejects_byte_channels() {
        let buffer = TensorBuffer::new(Vec2::new(2, 2), 1);
        assert!(buffer.to_f32_vec().is_err());
    }
}
