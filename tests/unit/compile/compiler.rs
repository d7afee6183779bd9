use super::*;
use crate::drawable::{Circle, CircleConfig, Drawable, Formula, FormulaConfig};
use crate::foundation::core::Point;
use crate::timeline::SlotEntry;

const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);

fn timeline(frames: u32) -> Timeline {
    Timeline::new(AnimationConfig {
        width: 64,
        height: 32,
        fps: frames,
        duration: 1.0,
        background: Rgba8::black(),
    })
    .unwrap()
}

fn disc(x: f64, color: Rgba8) -> Drawable {
    Circle::new(CircleConfig {
        center: Point::new(x, 16.0),
        radius: 10.0,
        color,
        ..CircleConfig::default()
    })
    .into()
}

fn sequential() -> CompileOpts {
    CompileOpts {
        parallel: false,
        threads: None,
    }
}

#[test]
fn later_drawables_paint_on_top() {
    let mut tl = timeline(1);
    tl.place(0, disc(20.0, RED)).unwrap();
    tl.place(0, disc(28.0, BLUE)).unwrap();

    let frames = compile(&tl, &AssetStore::default(), &sequential()).unwrap();
    assert_eq!(frames.len(), 1);
    let canvas = &frames.get(0).unwrap().canvas;
    assert_eq!(canvas.pixel(24, 16), Some(BLUE));
    assert_eq!(canvas.pixel(13, 16), Some(RED));
    assert_eq!(canvas.pixel(60, 2), Some(Rgba8::black()));
}

#[test]
fn empty_slots_are_background() {
    let tl = timeline(3);
    let frames = compile(&tl, &AssetStore::default(), &sequential()).unwrap();
    assert_eq!(frames.len(), 3);
    let bg = Canvas::new(64, 32, Rgba8::black()).unwrap();
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.index, i);
        assert_eq!(f.canvas, bg);
    }
}

#[test]
fn parallel_matches_sequential() {
    let mut tl = timeline(6);
    let seq = disc(10.0, RED).translate_frames(crate::foundation::core::Vec2::new(40.0, 0.0), 6);
    tl.place_sequence(0, seq).unwrap();
    tl.place(2, disc(40.0, BLUE)).unwrap();

    let assets = AssetStore::default();
    let a = compile(&tl, &assets, &sequential()).unwrap();
    let b = compile(
        &tl,
        &assets,
        &CompileOpts {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(a.frames(), b.frames());
}

#[test]
fn failing_drawable_is_skipped() {
    let mut tl = timeline(1);
    tl.place(0, disc(20.0, RED)).unwrap();
    tl.place(
        0,
        Formula::new(FormulaConfig {
            formula: "never rendered".into(),
            ..FormulaConfig::default()
        }),
    )
    .unwrap();

    let (frames, stats) = compile_with_stats(&tl, &AssetStore::default(), &sequential()).unwrap();
    assert_eq!(
        stats,
        CompileStats {
            frames: 1,
            painted: 1,
            skipped: 1
        }
    );
    assert_eq!(frames.get(0).unwrap().canvas.pixel(20, 16), Some(RED));
}

#[test]
fn sequence_entries_paint_like_individual_ones() {
    let mut nested = timeline(1);
    nested
        .place(0, SlotEntry::Sequence(vec![disc(20.0, RED), disc(28.0, BLUE)]))
        .unwrap();
    let mut flat = timeline(1);
    flat.place(0, disc(20.0, RED)).unwrap();
    flat.place(0, disc(28.0, BLUE)).unwrap();

    let assets = AssetStore::default();
    let a = compile(&nested, &assets, &sequential()).unwrap();
    let b = compile(&flat, &assets, &sequential()).unwrap();
    assert_eq!(a.frames(), b.frames());
}

#[test]
fn zero_threads_is_rejected() {
    let tl = timeline(2);
    let opts = CompileOpts {
        parallel: true,
        threads: Some(0),
    };
    assert!(compile(&tl, &AssetStore::default(), &opts).is_err());
}

#[test]
fn compiled_frames_carry_geometry() {
    let tl = timeline(2);
    let frames = compile(&tl, &AssetStore::default(), &CompileOpts::default()).unwrap();
    assert_eq!((frames.width(), frames.height(), frames.fps()), (64, 32, 2));
    assert_eq!(frames.background(), Rgba8::black());
}

#[test]
fn from_canvases_requires_matching_sizes() {
    let a = Canvas::new(2, 2, Rgba8::black()).unwrap();
    let b = Canvas::new(4, 2, Rgba8::black()).unwrap();
    assert!(CompiledFrames::from_canvases(1, Rgba8::black(), vec![a.clone(), b]).is_err());
    assert!(CompiledFrames::from_canvases(1, Rgba8::black(), Vec::new()).is_err());
    let ok = CompiledFrames::from_canvases(1, Rgba8::black(), vec![a.clone(), a]).unwrap();
    assert_eq!(ok.get(1).unwrap().index, 1);
}
