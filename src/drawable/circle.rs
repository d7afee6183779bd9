use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;
use crate::render::paint::PaintCtx;
use crate::transform::Animatable;

use super::Render;

/// How a circle is painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleStyle {
    /// Solid disc.
    #[default]
    Fill,
    /// Outline of the given width, centered on the circle edge.
    Stroke {
        /// Stroke width in pixels.
        width: f64,
    },
}

/// Circle configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CircleConfig {
    /// Center in canvas pixels.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Paint color; alpha is what fades animate.
    pub color: Rgba8,
    /// Fill or outline.
    pub style: CircleStyle,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            center: Point::ORIGIN,
            radius: 10.0,
            color: Rgba8::new(135, 206, 235, 255),
            style: CircleStyle::Fill,
        }
    }
}

/// Circle drawable.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    config: CircleConfig,
}

impl Circle {
    /// Circle from a full configuration.
    pub fn new(config: CircleConfig) -> Self {
        Self { config }
    }

    /// Filled circle with default color.
    pub fn at(center: Point, radius: f64) -> Self {
        Self::new(CircleConfig {
            center,
            radius,
            ..CircleConfig::default()
        })
    }

    /// Borrow the configuration.
    pub fn config(&self) -> &CircleConfig {
        &self.config
    }

    /// Copy with a different color.
    pub fn with_color(&self, color: Rgba8) -> Self {
        let mut config = self.config.clone();
        config.color = color;
        Self::new(config)
    }

    fn bbox(&self) -> Rect {
        let c = self.config.center;
        let r = self.config.radius;
        Rect::new(c.x - r, c.y - r, c.x + r, c.y + r)
    }
}

impl Render for Circle {
    fn render_to(&self, canvas: &mut Canvas, _ctx: &mut PaintCtx<'_>) -> FrameloomResult<()> {
        let r = self.config.radius;
        if !r.is_finite() || r <= 0.0 {
            return Err(FrameloomError::validation(
                "circle radius must be finite and > 0",
            ));
        }
        match self.config.style {
            CircleStyle::Fill => canvas.fill_ellipse(self.bbox(), self.config.color),
            CircleStyle::Stroke { width } => {
                canvas.stroke_ellipse(self.bbox(), width, self.config.color)
            }
        }
    }

    fn bounds(&self, _ctx: &mut PaintCtx<'_>) -> FrameloomResult<Rect> {
        let bbox = self.bbox();
        Ok(match self.config.style {
            CircleStyle::Fill => bbox,
            CircleStyle::Stroke { width } => bbox.inflate(width / 2.0, width / 2.0),
        })
    }
}

impl Animatable for Circle {
    fn position(&self) -> Point {
        self.config.center
    }

    fn offset(&self, by: Vec2) -> Self {
        let mut config = self.config.clone();
        config.center += by;
        Self::new(config)
    }

    fn with_opacity(&self, opacity: f64) -> Self {
        self.with_color(self.config.color.with_opacity(opacity))
    }
}
