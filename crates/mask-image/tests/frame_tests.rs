use mask_base::Vec2;
use mask_image::{Frame, ImageError};

#[test]
fn test_new_rejects_wrong_pixel_count() {
    let result = Frame::new(Vec2::new(4, 4), vec![0; 15]);
    assert!(matches!(
        result,
        Err(ImageError::Size {
            expected: 16,
            got: 15
        })
    ));
}

#[test]
fn test_from_rgb_sets_opaque_alpha() {
    let data = [255, 0, 0, 0, 128, 255];
    let frame = Frame::from_rgb(Vec2::new(2, 1), &data).unwrap();
    assert_eq!(frame.pixels(), &[0xFFFF_0000, 0xFF00_80FF]);
}

#[test]
fn test_from_argb_keeps_alpha_first() {
    let data = [0x40, 0x01, 0x02, 0x03];
    let frame = Frame::from_argb(Vec2::new(1, 1), &data).unwrap();
    assert_eq!(frame.pixels(), &[0x4001_0203]);
}

#[test]
fn test_from_rgba_moves_alpha_to_high_byte() {
    let data = [0x01, 0x02, 0x03, 0x40];
    let frame = Frame::from_rgba(Vec2::new(1, 1), &data).unwrap();
    assert_eq!(frame.pixels(), &[0x4001_0203]);
}

#[test]
fn test_from_rgb_rejects_short_buffer() {
    let result = Frame::from_rgb(Vec2::new(2, 2), &[0; 11]);
    assert!(matches!(result, Err(ImageError::Size { expected: 12, got: 11 })));
}

#[test]
fn test_pixel_is_row_major() {
    let frame = Frame::new(Vec2::new(3, 2), vec![0, 1, 2, 3, 4, 5]).unwrap();
    assert_eq!(frame.width(), 3);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.pixel(2, 0), Some(2));
    assert_eq!(frame.pixel(0, 1), Some(3));
    assert_eq!(frame.pixel(3, 0), None);
    assert_eq!(frame.pixel(0, 2), None);
}

#[test]
fn test_scale_to_target_size() {
    let frame = Frame::filled(Vec2::new(64, 48), 0xFF20_4060);
    let scaled = frame.scale_to(Vec2::new(224, 224));
    assert_eq!(scaled.size(), Vec2::new(224, 224));
    assert_eq!(scaled.len(), 224 * 224);
    // a uniform image stays uniform under bilinear filtering
    assert!(scaled.pixels().iter().all(|&p| p == 0xFF20_4060));
}

#[test]
fn test_scale_to_same_size_is_identity() {
    let frame = Frame::new(Vec2::new(2, 2), vec![1, 2, 3, 4]).unwrap();
    assert_eq!(frame.scale_to(Vec2::new(2, 2)), frame);
}
