//! Pure operators that expand one drawable into a per-frame sequence of variants.
//!
//! Every operator returns fresh values; the input is never modified, so a sequence
//! can be placed into the timeline next to sequences built from the same original.

mod motion;
mod opacity;
mod reveal;

use crate::foundation::core::{Point, Vec2};

pub use motion::{translate, translate_frames};
pub use opacity::{fade_in, fade_out, hold};
pub use reveal::{revealed_counts, roll};

/// Position and opacity variations available on every drawable.
pub trait Animatable: Clone {
    /// Anchor position: center for circles, top-left corner otherwise.
    fn position(&self) -> Point;

    /// Copy moved by `by`.
    fn offset(&self, by: Vec2) -> Self;

    /// Copy drawn at unit opacity `opacity`.
    fn with_opacity(&self, opacity: f64) -> Self;
}

/// Character-prefix truncation for text-bearing drawables.
pub trait Reveal: Clone {
    /// Number of characters that a full reveal shows.
    fn char_len(&self) -> usize;

    /// Copy showing only the first `chars` characters.
    fn reveal(&self, chars: usize) -> Self;
}
