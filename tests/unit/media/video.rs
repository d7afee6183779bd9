use super::*;
use crate::drawable::Circle;
use crate::foundation::core::Point;

fn clip(frames: usize) -> VideoClip {
    let canvases = (0..frames)
        .map(|_| Canvas::new(16, 16, Rgba8::black()).unwrap())
        .collect();
    VideoClip::from_frames(25.0, canvases).unwrap()
}

fn dot() -> Drawable {
    Circle::at(Point::new(8.0, 8.0), 4.0)
        .with_color(Rgba8::new(255, 255, 255, 255))
        .into()
}

fn painted(c: &VideoClip, i: usize) -> bool {
    c.frame(i).unwrap().pixel(8, 8) != Some(Rgba8::black())
}

#[test]
fn parse_frame_rate_accepts_ratios_and_plain_numbers() {
    assert_eq!(parse_frame_rate("25").unwrap(), 25.0);
    assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
    assert!(parse_frame_rate("0/0").is_err());
    assert!(parse_frame_rate("0").is_err());
    assert!(parse_frame_rate("abc").is_err());
}

#[test]
fn info_fps_rounds_and_never_hits_zero() {
    let mut info = clip(1).info().clone();
    assert_eq!(info.fps(), 25);
    info.frame_rate = 29.97;
    assert_eq!(info.fps(), 30);
    info.frame_rate = 0.2;
    assert_eq!(info.fps(), 1);
}

#[test]
fn from_frames_validates_input() {
    assert!(VideoClip::from_frames(25.0, Vec::new()).is_err());
    assert!(VideoClip::from_frames(0.0, vec![Canvas::new(2, 2, Rgba8::black()).unwrap()]).is_err());
    let mixed = vec![
        Canvas::new(2, 2, Rgba8::black()).unwrap(),
        Canvas::new(4, 2, Rgba8::black()).unwrap(),
    ];
    assert!(VideoClip::from_frames(25.0, mixed).is_err());
}

#[test]
fn overlay_paints_requested_range_clipped_to_length() {
    let mut c = clip(5);
    let n = c.overlay(&dot(), 3, 10, &AssetStore::default()).unwrap();
    assert_eq!(n, 2);
    assert!(!painted(&c, 2));
    assert!(painted(&c, 3));
    assert!(painted(&c, 4));

    let mut c = clip(2);
    assert_eq!(c.overlay(&dot(), 7, 1, &AssetStore::default()).unwrap(), 0);
}

#[test]
fn overlay_sequence_paints_one_variant_per_frame() {
    let mut c = clip(3);
    c.overlay_sequence(&[dot(), dot()], 1, &AssetStore::default())
        .unwrap();
    assert!(!painted(&c, 0));
    assert!(painted(&c, 1));
    assert!(painted(&c, 2));

    let err = c
        .overlay_sequence(&[dot(), dot()], 2, &AssetStore::default())
        .unwrap_err();
    assert!(matches!(err, FrameloomError::OutOfRange { index: 3, total: 3 }));
}
