use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::assets::fonts::{FontMeasure, TextBrushRgba8, TextMeasure};
use crate::assets::store::AssetStore;
use crate::drawable::TextConfig;
use crate::foundation::core::Point;
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;

/// Mutable per-worker paint state: shaping contexts and decoded font handles.
///
/// Not shared between threads; each compile worker builds its own from the shared
/// [`AssetStore`].
pub struct PaintCtx<'a> {
    assets: &'a AssetStore,
    measure: FontMeasure<'a>,
    font_data: HashMap<PathBuf, vello_cpu::peniko::FontData>,
}

impl<'a> PaintCtx<'a> {
    /// Fresh paint state over `assets`.
    pub fn new(assets: &'a AssetStore) -> Self {
        Self {
            assets,
            measure: FontMeasure::new(assets.fonts()),
            font_data: HashMap::new(),
        }
    }

    /// The shared asset store.
    pub fn assets(&self) -> &'a AssetStore {
        self.assets
    }

    /// Shape and paint one line of text.
    pub fn draw_text(&mut self, canvas: &mut Canvas, cfg: &TextConfig) -> FrameloomResult<()> {
        self.shape_text(cfg)?.paint(canvas)
    }

    /// Shape one line of text and resolve its font without touching any canvas.
    pub fn shape_text(&mut self, cfg: &TextConfig) -> FrameloomResult<ShapedText> {
        let brush = TextBrushRgba8 {
            r: cfg.color.r,
            g: cfg.color.g,
            b: cfg.color.b,
            a: cfg.color.a,
        };
        let (key, layout) = self
            .measure
            .layout(&cfg.text, cfg.size, cfg.font.as_deref(), brush)?;
        let font = self.font_data(&key)?;
        Ok(ShapedText {
            layout,
            font,
            origin: cfg.position,
        })
    }

    fn font_data(&mut self, key: &Path) -> FrameloomResult<vello_cpu::peniko::FontData> {
        if let Some(f) = self.font_data.get(key) {
            return Ok(f.clone());
        }
        let bytes = self.measure.font_bytes(key).ok_or_else(|| {
            FrameloomError::validation(format!("font '{}' is not loaded", key.display()))
        })?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        self.font_data.insert(key.to_path_buf(), font.clone());
        Ok(font)
    }
}

/// A line of text ready to paint.
pub struct ShapedText {
    layout: parley::Layout<TextBrushRgba8>,
    font: vello_cpu::peniko::FontData,
    origin: Point,
}

impl ShapedText {
    /// Paint onto `canvas`.
    pub fn paint(&self, canvas: &mut Canvas) -> FrameloomResult<()> {
        canvas.draw_text_layout(&self.layout, &self.font, self.origin)
    }
}

impl TextMeasure for PaintCtx<'_> {
    fn text_width(&mut self, text: &str, size_px: f32, font: Option<&Path>) -> FrameloomResult<f64> {
        self.measure.text_width(text, size_px, font)
    }

    fn line_height(&mut self, size_px: f32, font: Option<&Path>) -> FrameloomResult<f64> {
        self.measure.line_height(size_px, font)
    }
}
