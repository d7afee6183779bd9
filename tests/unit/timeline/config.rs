use super::*;

fn cfg(duration: f64, fps: u32) -> AnimationConfig {
    AnimationConfig {
        duration,
        fps,
        ..AnimationConfig::default()
    }
}

#[test]
fn defaults() {
    let c = AnimationConfig::default();
    assert_eq!((c.width, c.height, c.fps), (640, 480, 30));
    assert_eq!(c.duration, 10.0);
    assert_eq!(c.background, Rgba8::black());
    assert_eq!(c.total_frames(), 300);
}

#[test]
fn total_frames_rounds_duration_times_fps() {
    assert_eq!(cfg(1.0, 1).total_frames(), 1);
    assert_eq!(cfg(2.5, 3).total_frames(), 8);
    assert_eq!(cfg(0.1, 24).total_frames(), 2);
    assert_eq!(cfg(1.0 / 3.0, 30).total_frames(), 10);
}

#[test]
fn validate_rejects_unusable_configs() {
    assert!(cfg(1.0, 1).validate().is_ok());
    assert!(cfg(0.4, 1).validate().is_err());
    assert!(cfg(0.0, 30).validate().is_err());
    assert!(cfg(-1.0, 30).validate().is_err());
    assert!(cfg(f64::NAN, 30).validate().is_err());
    assert!(cfg(1.0, 0).validate().is_err());
    let zero_w = AnimationConfig {
        width: 0,
        ..AnimationConfig::default()
    };
    assert!(zero_w.validate().is_err());
}

#[test]
fn validate_rejects_frame_counts_past_the_limit() {
    let huge = cfg(1e18, 30);
    assert!(matches!(huge.validate(), Err(FrameloomError::Validation(_))));
    assert!(cfg(f64::MAX, 30).validate().is_err());
    assert!(cfg(MAX_FRAMES as f64, 1).validate().is_ok());
    assert!(cfg(MAX_FRAMES as f64 + 1.0, 1).validate().is_err());
    assert!(crate::timeline::Timeline::new(huge).is_err());
}

#[test]
fn from_reader_fills_defaults() {
    let json = r#"{"width": 64, "height": 48, "fps": 2, "duration": 1.5, "background": [1, 2, 3, 255]}"#;
    let c = AnimationConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!((c.width, c.height, c.fps), (64, 48, 2));
    assert_eq!(c.background, Rgba8::new(1, 2, 3, 255));
    assert_eq!(c.total_frames(), 3);

    let partial = AnimationConfig::from_reader(r#"{"fps": 5}"#.as_bytes()).unwrap();
    assert_eq!(partial.width, 640);
    assert_eq!(partial.total_frames(), 50);
}

#[test]
fn from_reader_rejects_unknown_fields_and_bad_values() {
    assert!(matches!(
        AnimationConfig::from_reader(r#"{"framerate": 5}"#.as_bytes()),
        Err(FrameloomError::Serde(_))
    ));
    assert!(matches!(
        AnimationConfig::from_reader(r#"{"duration": 0}"#.as_bytes()),
        Err(FrameloomError::Validation(_))
    ));
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("anim.json");
    std::fs::write(&p, r#"{"duration": 2, "fps": 4}"#).unwrap();
    assert_eq!(AnimationConfig::from_path(&p).unwrap().total_frames(), 8);
    assert!(AnimationConfig::from_path(dir.path().join("missing.json")).is_err());
}
