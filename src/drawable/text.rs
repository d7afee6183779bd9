use std::path::PathBuf;

use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
use crate::foundation::error::FrameloomResult;
use crate::render::canvas::Canvas;
use crate::render::paint::PaintCtx;
use crate::transform::{Animatable, Reveal};

use super::Render;

/// Text configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Content to draw.
    pub text: String,
    /// Fill color; alpha is what fades animate.
    pub color: Rgba8,
    /// Font size in pixels.
    pub size: f32,
    /// Top-left corner of the text box.
    pub position: Point,
    /// Font file to use; `None` selects the font book default.
    pub font: Option<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Rgba8::new(0, 0, 255, 255),
            size: 20.0,
            position: Point::new(50.0, 0.0),
            font: None,
        }
    }
}

/// Single-line text drawable.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    config: TextConfig,
}

impl Text {
    /// Text from a full configuration.
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Borrow the configuration.
    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// The text content.
    pub fn text(&self) -> &str {
        &self.config.text
    }

    /// Copy with different content, keeping every other setting.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        let mut config = self.config.clone();
        config.text = text.into();
        Self::new(config)
    }

    /// Copy moved to `position`.
    pub fn with_position(&self, position: Point) -> Self {
        let mut config = self.config.clone();
        config.position = position;
        Self::new(config)
    }
}

impl Render for Text {
    fn render_to(&self, canvas: &mut Canvas, ctx: &mut PaintCtx<'_>) -> FrameloomResult<()> {
        if self.config.text.is_empty() {
            return Ok(());
        }
        ctx.draw_text(canvas, &self.config)
    }

    fn bounds(&self, ctx: &mut PaintCtx<'_>) -> FrameloomResult<Rect> {
        use crate::assets::fonts::TextMeasure as _;

        let font = self.config.font.as_deref();
        let w = ctx.text_width(&self.config.text, self.config.size, font)?;
        let h = ctx.line_height(self.config.size, font)?;
        Ok(Rect::from_origin_size(self.config.position, (w, h)))
    }
}

impl Animatable for Text {
    fn position(&self) -> Point {
        self.config.position
    }

    fn offset(&self, by: Vec2) -> Self {
        self.with_position(self.config.position + by)
    }

    fn with_opacity(&self, opacity: f64) -> Self {
        let mut config = self.config.clone();
        config.color = config.color.with_opacity(opacity);
        Self::new(config)
    }
}

impl Reveal for Text {
    fn char_len(&self) -> usize {
        self.config.text.chars().count()
    }

    fn reveal(&self, chars: usize) -> Self {
        self.with_text(self.config.text.chars().take(chars).collect::<String>())
    }
}
