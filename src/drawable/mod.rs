//! Paintable visual primitives.
//!
//! A [`Drawable`] is an immutable value: every transform returns new instances, so the
//! same drawable can appear in many frame slots without aliasing.

pub mod circle;
pub mod formula;
pub mod text;
pub mod wrap;

use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::FrameloomResult;
use crate::render::canvas::Canvas;
use crate::render::paint::PaintCtx;
use crate::transform::{Animatable, Reveal};

pub use circle::{Circle, CircleConfig, CircleStyle};
pub use formula::{Formula, FormulaConfig};
pub use text::{Text, TextConfig};
pub use wrap::{WrapOpts, WrappedText};

/// Rasterization capability shared by every drawable variant.
pub trait Render {
    /// Paint onto `canvas` at the stored position. Never mutates `self`.
    fn render_to(&self, canvas: &mut Canvas, ctx: &mut PaintCtx<'_>) -> FrameloomResult<()>;

    /// Region covered when painted.
    fn bounds(&self, ctx: &mut PaintCtx<'_>) -> FrameloomResult<Rect>;
}

/// Closed set of drawable kinds placed into frame slots.
#[derive(Clone, Debug, PartialEq)]
pub enum Drawable {
    /// Filled or stroked circle.
    Circle(Circle),
    /// Single line of text.
    Text(Text),
    /// Text split into lines that fit a maximum width.
    WrappedText(WrappedText),
    /// Externally rendered formula bitmap.
    Formula(Formula),
}

impl Drawable {
    /// Short variant name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle(_) => "circle",
            Self::Text(_) => "text",
            Self::WrappedText(_) => "wrapped_text",
            Self::Formula(_) => "formula",
        }
    }

    /// Copy offset by `by`.
    pub fn translate(&self, by: Vec2) -> Self {
        crate::transform::translate(self, by)
    }

    /// Per-frame positions moving toward `by`; see [`crate::transform::translate_frames`].
    pub fn translate_frames(&self, by: Vec2, frames: usize) -> Vec<Self> {
        crate::transform::translate_frames(self, by, frames)
    }

    /// See [`crate::transform::fade_in`].
    pub fn fade_in(&self, frames: usize, start: f64, end: f64) -> FrameloomResult<Vec<Self>> {
        crate::transform::fade_in(self, frames, start, end)
    }

    /// See [`crate::transform::fade_out`].
    pub fn fade_out(&self, frames: usize, start: f64, end: f64) -> FrameloomResult<Vec<Self>> {
        crate::transform::fade_out(self, frames, start, end)
    }

    /// Character reveal; non-text drawables come back as unchanged copies.
    pub fn roll(&self, frames: usize) -> Vec<Self> {
        crate::transform::roll(self, frames)
    }

    /// `frames` identical copies.
    pub fn hold(&self, frames: usize) -> Vec<Self> {
        crate::transform::hold(self, frames)
    }
}

impl Render for Drawable {
    fn render_to(&self, canvas: &mut Canvas, ctx: &mut PaintCtx<'_>) -> FrameloomResult<()> {
        match self {
            Self::Circle(d) => d.render_to(canvas, ctx),
            Self::Text(d) => d.render_to(canvas, ctx),
            Self::WrappedText(d) => d.render_to(canvas, ctx),
            Self::Formula(d) => d.render_to(canvas, ctx),
        }
    }

    fn bounds(&self, ctx: &mut PaintCtx<'_>) -> FrameloomResult<Rect> {
        match self {
            Self::Circle(d) => d.bounds(ctx),
            Self::Text(d) => d.bounds(ctx),
            Self::WrappedText(d) => d.bounds(ctx),
            Self::Formula(d) => d.bounds(ctx),
        }
    }
}

impl Animatable for Drawable {
    fn position(&self) -> Point {
        match self {
            Self::Circle(d) => d.position(),
            Self::Text(d) => d.position(),
            Self::WrappedText(d) => d.position(),
            Self::Formula(d) => d.position(),
        }
    }

    fn offset(&self, by: Vec2) -> Self {
        match self {
            Self::Circle(d) => Self::Circle(d.offset(by)),
            Self::Text(d) => Self::Text(d.offset(by)),
            Self::WrappedText(d) => Self::WrappedText(d.offset(by)),
            Self::Formula(d) => Self::Formula(d.offset(by)),
        }
    }

    fn with_opacity(&self, opacity: f64) -> Self {
        match self {
            Self::Circle(d) => Self::Circle(d.with_opacity(opacity)),
            Self::Text(d) => Self::Text(d.with_opacity(opacity)),
            Self::WrappedText(d) => Self::WrappedText(d.with_opacity(opacity)),
            Self::Formula(d) => Self::Formula(d.with_opacity(opacity)),
        }
    }
}

impl Reveal for Drawable {
    fn char_len(&self) -> usize {
        match self {
            Self::Text(d) => d.char_len(),
            Self::WrappedText(d) => d.char_len(),
            Self::Circle(_) | Self::Formula(_) => 0,
        }
    }

    fn reveal(&self, chars: usize) -> Self {
        match self {
            Self::Text(d) => Self::Text(d.reveal(chars)),
            Self::WrappedText(d) => Self::WrappedText(d.reveal(chars)),
            Self::Circle(_) | Self::Formula(_) => self.clone(),
        }
    }
}

impl From<Circle> for Drawable {
    fn from(d: Circle) -> Self {
        Self::Circle(d)
    }
}

impl From<Text> for Drawable {
    fn from(d: Text) -> Self {
        Self::Text(d)
    }
}

impl From<WrappedText> for Drawable {
    fn from(d: WrappedText) -> Self {
        Self::WrappedText(d)
    }
}

impl From<Formula> for Drawable {
    fn from(d: Formula) -> Self {
        Self::Formula(d)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/mod.rs"]
mod tests;
