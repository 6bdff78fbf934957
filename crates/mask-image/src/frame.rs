use crate::ImageError;
use crates_image::{RgbaImage, imageops::FilterType};
use mask_base::Vec2;

fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// A captured image as packed `0xAARRGGBB` pixels in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    size: Vec2<usize>,
    pixels: Vec<u32>,
}

impl Frame {
    pub fn new(size: Vec2<usize>, pixels: Vec<u32>) -> Result<Self, ImageError> {
        check_len(size.area(), pixels.len())?;
        Ok(Self { size, pixels })
    }

    /// A frame with every pixel set to `pixel`.
    pub fn filled(size: Vec2<usize>, pixel: u32) -> Self {
        Self {
            size,
            pixels: vec![pixel; size.area()],
        }
    }

    /// Pack tightly laid out RGB8 bytes. Alpha becomes 0xFF.
    pub fn from_rgb(size: Vec2<usize>, data: &[u8]) -> Result<Self, ImageError> {
        check_len(size.area() * 3, data.len())?;
        let pixels = data
            .chunks_exact(3)
            .map(|c| pack_argb(0xFF, c[0], c[1], c[2]))
            .collect();
        Ok(Self { size, pixels })
    }

    /// Pack ARGB8 bytes (alpha first, as delivered by the camera).
    pub fn from_argb(size: Vec2<usize>, data: &[u8]) -> Result<Self, ImageError> {
        check_len(size.area() * 4, data.len())?;
        let pixels = data
            .chunks_exact(4)
            .map(|c| pack_argb(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self { size, pixels })
    }

    /// Pack RGBA8 bytes (alpha last, as produced by the `image` crate).
    pub fn from_rgba(size: Vec2<usize>, data: &[u8]) -> Result<Self, ImageError> {
        check_len(size.area() * 4, data.len())?;
        let pixels = data
            .chunks_exact(4)
            .map(|c| pack_argb(c[3], c[0], c[1], c[2]))
            .collect();
        Ok(Self { size, pixels })
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        self.pixels.get(y * self.size.x + x).copied()
    }

    fn to_rgba_image(&self) -> RgbaImage {
        let mut raw = Vec::with_capacity(self.pixels.len() * 4);
        for &p in &self.pixels {
            raw.extend_from_slice(&[(p >> 16) as u8, (p >> 8) as u8, p as u8, (p >> 24) as u8]);
        }
        // length always matches width * height * 4
        RgbaImage::from_raw(self.size.x as u32, self.size.y as u32, raw)
            .unwrap_or_else(|| RgbaImage::new(self.size.x as u32, self.size.y as u32))
    }

    /// Bilinear resize to `size`. Returns a clone when the size already matches.
    pub fn scale_to(&self, size: Vec2<usize>) -> Frame {
        if size == self.size {
            return self.clone();
        }
        let scaled = crates_image::imageops::resize(
            &self.to_rgba_image(),
            size.x as u32,
            size.y as u32,
            FilterType::Triangle,
        );
        frame_from_rgba_image(&scaled)
    }
}

fn check_len(expected: usize, got: usize) -> Result<(), ImageError> {
    if expected != got {
        return Err(ImageError::Size { expected, got });
    }
    Ok(())
}

pub(crate) fn frame_from_rgba_image(image: &RgbaImage) -> Frame {
    let (w, h) = image.dimensions();
    let pixels = image
        .pixels()
        .map(|p| pack_argb(p[3], p[0], p[1], p[2]))
        .collect();
    Frame {
        size: Vec2::new(w as usize, h as usize),
        pixels,
    }
}
