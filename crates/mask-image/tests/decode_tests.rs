use crates_image::{ImageFormat, Rgb, RgbImage};
use mask_base::Vec2;
use mask_image::{decode_frame, decode_frame_sync, ImageError};
use std::io::Cursor;

fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(rgb));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("PNG encoding failed");
    buffer
}

#[test]
fn test_decode_png_sync() {
    let png = solid_png(5, 3, [255, 0, 0]);
    let frame = decode_frame_sync(&png).unwrap();
    assert_eq!(frame.size(), Vec2::new(5, 3));
    assert!(frame.pixels().iter().all(|&p| p == 0xFFFF_0000));
}

#[tokio::test]
async fn test_decode_png_async() {
    let png = solid_png(2, 2, [0, 0, 255]);
    let frame = decode_frame(&png).await.unwrap();
    assert_eq!(frame.len(), 4);
    assert_eq!(frame.pixel(1, 1), Some(0xFF00_00FF));
}

#[tokio::test]
async fn test_decode_garbage_fails() {
    let result = decode_frame(&[0x00, 0x01, 0x02, 0x03]).await;
    assert!(matches!(result, Err(ImageError::Decode(_))));
}
