use crate::{InferError, TensorBuffer};
use mask_image::Frame;
use std::time::Instant;

/// Writes one packed `0xAARRGGBB` pixel into the tensor buffer.
pub trait PixelPacker: Send {
    /// Bytes this packer writes per color channel.
    fn bytes_per_channel(&self) -> usize;

    fn pack(&self, pixel: u32, buffer: &mut TensorBuffer) -> Result<(), InferError>;
}

/// R, G, B as `f32` values in 0..=255. Alpha is dropped and values are not normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatRgbPacker;

impl PixelPacker for FloatRgbPacker {
    fn bytes_per_channel(&self) -> usize {
        4
    }

    fn pack(&self, pixel: u32, buffer: &mut TensorBuffer) -> Result<(), InferError> {
        buffer.put_f32(((pixel >> 16) & 0xFF) as f32)?;
        buffer.put_f32(((pixel >> 8) & 0xFF) as f32)?;
        buffer.put_f32((pixel & 0xFF) as f32)
    }
}

/// Overwrite `buffer` with `frame`, pixel by pixel in row-major order.
///
/// The frame must match the buffer geometry exactly; nothing is resized here.
/// On a mismatch the buffer is left untouched.
pub fn pack_frame(
    frame: &Frame,
    packer: &dyn PixelPacker,
    buffer: &mut TensorBuffer,
) -> Result<(), InferError> {
    if frame.size() != buffer.size() {
        return Err(InferError::ShapeMismatch {
            expected: format!("{} frame", buffer.size()),
            got: format!("{} frame", frame.size()),
        });
    }
    if packer.bytes_per_channel() != buffer.bytes_per_channel() {
        return Err(InferError::ShapeMismatch {
            expected: format!("{} bytes per channel", buffer.bytes_per_channel()),
            got: format!("{} bytes per channel", packer.bytes_per_channel()),
        });
    }

    let start = Instant::now();
    buffer.rewind();
    for &pixel in frame.pixels() {
        packer.pack(pixel, buffer)?;
    }
    log::debug!(
        "Time cost to put values into tensor buffer: {}ms",
        start.elapsed().as_millis()
    );
    Ok(())
}
