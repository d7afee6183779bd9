use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::drawable::{Formula, FormulaConfig, TextConfig};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::timeline::AnimationConfig;

#[derive(Default)]
struct WhiteSquare {
    calls: AtomicUsize,
}

impl FormulaRenderer for WhiteSquare {
    fn render(&self, _formula: &str) -> FrameloomResult<Bitmap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Bitmap::from_straight_rgba8(1, 1, vec![255, 255, 255, 255])
    }
}

struct Failing;

impl FormulaRenderer for Failing {
    fn render(&self, _formula: &str) -> FrameloomResult<Bitmap> {
        Err(FrameloomError::external("boom"))
    }
}

fn formula(src: &str, color: Rgba8) -> Drawable {
    Formula::new(FormulaConfig {
        formula: src.to_owned(),
        color,
        ..FormulaConfig::default()
    })
    .into()
}

#[test]
fn renders_each_formula_once_and_tints_per_color() {
    let red = Rgba8::new(255, 0, 0, 255);
    let blue = Rgba8::new(0, 0, 255, 255);
    let drawables = [formula("x", red), formula("x", red), formula("x", blue)];
    let r = WhiteSquare::default();

    let store = AssetStore::prepare_drawables(FontBook::new(), drawables.iter(), Some(&r));
    assert_eq!(r.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        store.formula("x", red).unwrap().rgba8_premul.as_slice(),
        &[255, 0, 0, 255]
    );
    assert_eq!(
        store.formula("x", blue).unwrap().rgba8_premul.as_slice(),
        &[0, 0, 255, 255]
    );
    assert!(store.formula("y", red).is_none());
}

#[test]
fn failed_formula_is_cached_as_missing() {
    let c = Rgba8::new(1, 2, 3, 255);
    let drawables = [formula("x", c)];
    let store = AssetStore::prepare_drawables(FontBook::new(), drawables.iter(), Some(&Failing));
    assert!(store.formula("x", c).is_none());
}

#[test]
fn no_renderer_skips_formulas() {
    let c = Rgba8::new(1, 2, 3, 255);
    let drawables = [formula("x", c)];
    let store = AssetStore::prepare_drawables(FontBook::new(), drawables.iter(), None);
    assert!(store.formula("x", c).is_none());
}

#[test]
fn unreadable_text_font_is_left_to_default() {
    let text: Drawable = Text::new(TextConfig {
        text: "hi".into(),
        font: Some("/definitely/not/here.ttf".into()),
        ..TextConfig::default()
    })
    .into();
    let store = AssetStore::prepare_drawables(FontBook::new(), [&text], None);
    assert!(
        !store
            .fonts()
            .contains(std::path::Path::new("/definitely/not/here.ttf"))
    );
}

#[test]
fn prepare_walks_every_slot() {
    let c = Rgba8::new(9, 9, 9, 255);
    let mut tl = Timeline::new(AnimationConfig {
        duration: 1.0,
        fps: 2,
        ..AnimationConfig::default()
    })
    .unwrap();
    tl.place(1, formula("late", c)).unwrap();

    let r = WhiteSquare::default();
    let store = AssetStore::prepare(FontBook::new(), &tl, Some(&r));
    assert!(store.formula("late", c).is_some());
}
