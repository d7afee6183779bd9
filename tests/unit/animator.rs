use super::*;
use crate::drawable::{Circle, Drawable};
use crate::foundation::core::{Point, Rgba8, Vec2};

fn animator(fps: u32) -> Animator {
    Animator::new(AnimationConfig {
        width: 32,
        height: 32,
        fps,
        duration: 1.0,
        background: Rgba8::black(),
    })
    .unwrap()
    .with_compile_opts(CompileOpts {
        parallel: false,
        threads: None,
    })
}

fn ball() -> Drawable {
    Circle::at(Point::new(8.0, 16.0), 4.0)
        .with_color(Rgba8::new(255, 0, 0, 255))
        .into()
}

#[test]
fn save_before_compile_is_a_precondition_failure() {
    let a = animator(2);
    let err = a.save(Path::new("out.mp4"), &SaveOpts::default()).unwrap_err();
    assert!(matches!(err, FrameloomError::Precondition(_)));
    assert!(matches!(
        a.compiled_frame(0),
        Err(FrameloomError::Precondition(_))
    ));
}

#[test]
fn compile_then_read_frames() {
    let mut a = animator(4);
    a.add_frames_objects(0, ball().translate_frames(Vec2::new(16.0, 0.0), 4))
        .unwrap();
    let stats = a.compile_frames().unwrap();
    assert_eq!((stats.frames, stats.painted, stats.skipped), (4, 4, 0));

    assert_eq!(a.compiled().unwrap().len(), 4);
    assert_eq!(a.compiled_frame(0).unwrap().pixel(8, 16), Some(Rgba8::new(255, 0, 0, 255)));
    assert_eq!(a.compiled_frame(3).unwrap().pixel(20, 16), Some(Rgba8::new(255, 0, 0, 255)));
    assert!(matches!(
        a.compiled_frame(4),
        Err(FrameloomError::OutOfRange { index: 4, total: 4 })
    ));
}

#[test]
fn adding_after_compile_discards_compiled_frames() {
    let mut a = animator(1);
    a.compile_frames().unwrap();
    assert!(a.compiled().is_some());
    a.add_frame_object(0, ball()).unwrap();
    assert!(a.compiled().is_none());
}

#[test]
fn out_of_range_placement_propagates() {
    let mut a = animator(2);
    let err = a.add_frames_objects(1, ball().hold(3)).unwrap_err();
    assert!(matches!(err, FrameloomError::OutOfRange { index: 2, total: 2 }));
    assert_eq!(a.timeline().slot(1).map(|s| s.len()), Some(1));
}

#[test]
fn image_sequence_requires_frame_dir() {
    let mut a = animator(2);
    a.compile_frames().unwrap();
    let opts = SaveOpts {
        mode: EncodeMode::ImageSequence,
        ..SaveOpts::default()
    };
    let err = a.save(Path::new("out.mp4"), &opts).unwrap_err();
    assert!(matches!(err, FrameloomError::Precondition(_)));
}

#[test]
fn empty_output_name_is_rejected_before_encoding() {
    let mut a = animator(2);
    a.compile_frames().unwrap();
    let opts = SaveOpts {
        mode: EncodeMode::Pipe,
        ..SaveOpts::default()
    };
    let err = a.save(Path::new("out/.mp4"), &opts).unwrap_err();
    assert!(matches!(err, FrameloomError::Precondition(_)));
}
