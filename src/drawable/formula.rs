use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;
use crate::render::paint::PaintCtx;
use crate::transform::Animatable;

use super::Render;

/// Formula configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormulaConfig {
    /// LaTeX source handed to the formula renderer.
    pub formula: String,
    /// Ink color the rendered coverage is tinted with.
    pub color: Rgba8,
    /// Top-left corner of the bitmap.
    pub position: Point,
    /// Opacity applied while compositing; this is what fades animate.
    pub alpha: f32,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            formula: String::new(),
            color: Rgba8::new(127, 255, 212, 255),
            position: Point::new(100.0, 50.0),
            alpha: 1.0,
        }
    }
}

/// Formula drawable. The bitmap itself lives in the asset store, keyed by
/// formula and color, so instances stay plain values.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    config: FormulaConfig,
}

impl Formula {
    /// Formula from a full configuration.
    pub fn new(config: FormulaConfig) -> Self {
        Self { config }
    }

    /// Borrow the configuration.
    pub fn config(&self) -> &FormulaConfig {
        &self.config
    }
}

impl Render for Formula {
    fn render_to(&self, canvas: &mut Canvas, ctx: &mut PaintCtx<'_>) -> FrameloomResult<()> {
        let bitmap = ctx
            .assets()
            .formula(&self.config.formula, self.config.color)
            .ok_or_else(|| {
                FrameloomError::external(format!(
                    "no bitmap available for formula '{}'",
                    self.config.formula
                ))
            })?;
        canvas.composite(bitmap, self.config.position, self.config.alpha)
    }

    fn bounds(&self, ctx: &mut PaintCtx<'_>) -> FrameloomResult<Rect> {
        let size = ctx
            .assets()
            .formula(&self.config.formula, self.config.color)
            .map(|b| (f64::from(b.width), f64::from(b.height)))
            .unwrap_or((0.0, 0.0));
        Ok(Rect::from_origin_size(self.config.position, size))
    }
}

impl Animatable for Formula {
    fn position(&self) -> Point {
        self.config.position
    }

    fn offset(&self, by: Vec2) -> Self {
        let mut config = self.config.clone();
        config.position += by;
        Self::new(config)
    }

    fn with_opacity(&self, opacity: f64) -> Self {
        let mut config = self.config.clone();
        config.alpha = opacity.clamp(0.0, 1.0) as f32;
        Self::new(config)
    }
}
