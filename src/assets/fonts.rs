use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{FrameloomError, FrameloomResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Font files keyed by the path they were loaded from, plus an optional default.
///
/// Text drawables name a font by path; a text without one (or naming a font that was
/// never loaded) falls back to the default.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    fonts: HashMap<PathBuf, Arc<Vec<u8>>>,
    default: Option<PathBuf>,
}

impl FontBook {
    /// Empty font book with no default font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` and make it the default font.
    pub fn with_default(path: impl AsRef<Path>) -> FrameloomResult<Self> {
        let mut book = Self::new();
        book.load(path.as_ref())?;
        book.set_default(path)?;
        Ok(book)
    }

    /// Read a font file from disk. Loading the same path twice is a no-op.
    pub fn load(&mut self, path: impl AsRef<Path>) -> FrameloomResult<()> {
        let path = path.as_ref();
        if self.fonts.contains_key(path) {
            return Ok(());
        }
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        self.insert_bytes(path, bytes);
        Ok(())
    }

    /// Register font bytes under `key` without touching the filesystem.
    pub fn insert_bytes(&mut self, key: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.fonts.insert(key.into(), Arc::new(bytes));
    }

    /// Mark an already loaded font as the default.
    pub fn set_default(&mut self, key: impl AsRef<Path>) -> FrameloomResult<()> {
        let key = key.as_ref();
        if !self.fonts.contains_key(key) {
            return Err(FrameloomError::validation(format!(
                "default font '{}' is not loaded",
                key.display()
            )));
        }
        self.default = Some(key.to_path_buf());
        Ok(())
    }

    /// Whether a font is registered under `key`.
    pub fn contains(&self, key: &Path) -> bool {
        self.fonts.contains_key(key)
    }

    /// Resolve the font a text should use.
    pub fn resolve(&self, requested: Option<&Path>) -> Option<(&Path, &Arc<Vec<u8>>)> {
        if let Some(p) = requested
            && let Some((k, bytes)) = self.fonts.get_key_value(p)
        {
            return Some((k.as_path(), bytes));
        }
        let default = self.default.as_deref()?;
        self.fonts
            .get_key_value(default)
            .map(|(k, bytes)| (k.as_path(), bytes))
    }
}

/// Width and line-height oracle used by text wrapping and bounds.
pub trait TextMeasure {
    /// Rendered advance width of `text`, in pixels.
    fn text_width(&mut self, text: &str, size_px: f32, font: Option<&Path>) -> FrameloomResult<f64>;

    /// Height of one line of text, in pixels.
    fn line_height(&mut self, size_px: f32, font: Option<&Path>) -> FrameloomResult<f64>;
}

/// Parley shaping contexts plus a per-font family-name cache.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<PathBuf, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, key: &Path, font_bytes: &[u8]) -> FrameloomResult<String> {
        if let Some(name) = self.families.get(key) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            FrameloomError::validation(format!(
                "no font families registered from '{}'",
                key.display()
            ))
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| FrameloomError::validation("registered font family has no name"))?
            .to_string();
        self.families.insert(key.to_path_buf(), family_name.clone());
        Ok(family_name)
    }

    /// Shape and lay out a single unbroken line of plain text.
    pub fn layout_plain(
        &mut self,
        key: &Path,
        font_bytes: &[u8],
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> FrameloomResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FrameloomError::validation(
                "text size must be finite and > 0",
            ));
        }

        let family_name = self.family_for(key, font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// [`TextMeasure`] backed by real font files.
pub struct FontMeasure<'a> {
    fonts: &'a FontBook,
    engine: TextLayoutEngine,
}

impl<'a> FontMeasure<'a> {
    /// Measure with fonts from `fonts`.
    pub fn new(fonts: &'a FontBook) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
        }
    }

    /// Shape `text` with the font resolved for `font`.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        font: Option<&Path>,
        brush: TextBrushRgba8,
    ) -> FrameloomResult<(PathBuf, parley::Layout<TextBrushRgba8>)> {
        let fonts = self.fonts;
        let (key, bytes) = fonts.resolve(font).ok_or_else(|| match font {
            Some(p) => FrameloomError::validation(format!(
                "font '{}' is not loaded and no default font is set",
                p.display()
            )),
            None => FrameloomError::validation("no font given and no default font is set"),
        })?;
        let layout = self
            .engine
            .layout_plain(key, bytes.as_slice(), text, size_px, brush)?;
        Ok((key.to_path_buf(), layout))
    }

    /// Borrow the font bytes registered under `key`.
    pub fn font_bytes(&self, key: &Path) -> Option<&Arc<Vec<u8>>> {
        self.fonts.resolve(Some(key)).map(|(_, bytes)| bytes)
    }
}

impl TextMeasure for FontMeasure<'_> {
    fn text_width(&mut self, text: &str, size_px: f32, font: Option<&Path>) -> FrameloomResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let (_, layout) = self.layout(text, size_px, font, TextBrushRgba8::default())?;
        Ok(f64::from(layout.width()))
    }

    fn line_height(&mut self, size_px: f32, font: Option<&Path>) -> FrameloomResult<f64> {
        let (_, layout) = self.layout("Hg", size_px, font, TextBrushRgba8::default())?;
        Ok(f64::from(layout.height()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
