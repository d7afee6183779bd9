use super::*;

#[test]
fn opacity_truncates_like_integer_cast() {
    let c = Rgba8::new(10, 20, 30, 255);
    assert_eq!(c.with_opacity(0.0).a, 0);
    assert_eq!(c.with_opacity(0.5).a, 127);
    assert_eq!(c.with_opacity(1.0).a, 255);
    assert_eq!(c.with_opacity(1.7).a, 255);
    assert_eq!(c.with_opacity(-0.2).a, 0);
}

#[test]
fn premultiply_roundtrip_is_close_for_opaque_and_half() {
    assert_eq!(premultiply([200, 100, 50, 255]), [200, 100, 50, 255]);
    assert_eq!(premultiply([200, 100, 50, 0]), [0, 0, 0, 0]);

    let back = unpremultiply(premultiply([200, 100, 50, 128]));
    for (got, want) in back.iter().zip([200u8, 100, 50, 128]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
}

#[test]
fn rgba8_serializes_as_array() {
    let c = Rgba8::new(1, 2, 3, 4);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "[1,2,3,4]");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}
