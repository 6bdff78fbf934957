//! Camera frames for the mask classifier.
//!
//! A `Frame` holds packed `0xAARRGGBB` pixels in row-major order, the layout
//! the classifier's tensor packer reads. Frames are built from raw camera
//! buffers or decoded from encoded images with the `image` crate.

pub mod error;
pub mod frame;

pub use error::ImageError;
pub use frame::Frame;

/// Decodes an encoded image (JPEG, PNG, BMP, WebP) into a `Frame`.
pub fn decode_frame_sync(data: &[u8]) -> Result<Frame, ImageError> {
    let rgba = crates_image::load_from_memory(data)?.to_rgba8();
    Ok(frame::frame_from_rgba_image(&rgba))
}

/// Decodes an encoded image into a `Frame` on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub async fn decode_frame(data: &[u8]) -> Result<Frame, ImageError> {
    let owned = data.to_vec();
    tokio::task::spawn_blocking(move || decode_frame_sync(&owned))
        .await
        .map_err(|e| ImageError::Decode(e.to_string()))?
}
