use mask_base::Vec2;

#[test]
fn test_new_and_fields() {
    let v = Vec2::new(224usize, 160);
    assert_eq!(v.x, 224);
    assert_eq!(v.y, 160);
}

#[test]
fn test_area() {
    assert_eq!(Vec2::new(224usize, 224).area(), 50176);
    assert_eq!(Vec2::new(0usize, 10).area(), 0);
}

#[test]
fn test_display() {
    assert_eq!(Vec2::new(640usize, 480).to_string(), "640x480");
}
