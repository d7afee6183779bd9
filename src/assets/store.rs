use std::collections::HashMap;

use crate::assets::bitmap::Bitmap;
use crate::assets::fonts::FontBook;
use crate::assets::formula::FormulaRenderer;
use crate::drawable::{Drawable, Text};
use crate::foundation::core::Rgba8;
use crate::timeline::Timeline;

/// Cache key for a rendered formula: the bitmap is tinted once per ink color.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FormulaKey {
    /// Formula source.
    pub formula: String,
    /// Ink color applied to the coverage.
    pub color: Rgba8,
}

/// Immutable, front-loaded asset cache shared by every compile worker.
///
/// A formula whose rendering failed is cached as `None`, so it is attempted once and
/// skipped on every frame it appears in.
#[derive(Debug, Default)]
pub struct AssetStore {
    fonts: FontBook,
    formulas: HashMap<FormulaKey, Option<Bitmap>>,
}

impl AssetStore {
    /// Store holding only fonts.
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts,
            formulas: HashMap::new(),
        }
    }

    /// Resolve everything the drawables placed in `timeline` need.
    #[tracing::instrument(skip_all, fields(frames = timeline.total_frames()))]
    pub fn prepare(
        fonts: FontBook,
        timeline: &Timeline,
        renderer: Option<&dyn FormulaRenderer>,
    ) -> Self {
        Self::prepare_drawables(fonts, timeline.drawables(), renderer)
    }

    /// Resolve everything `drawables` need.
    ///
    /// Fonts named by text drawables are loaded if the book does not already hold them;
    /// a font that cannot be read is reported and left to fall back to the default.
    pub fn prepare_drawables<'d>(
        mut fonts: FontBook,
        drawables: impl IntoIterator<Item = &'d Drawable>,
        renderer: Option<&dyn FormulaRenderer>,
    ) -> Self {
        let mut formulas: HashMap<FormulaKey, Option<Bitmap>> = HashMap::new();
        let mut coverage: HashMap<String, Option<Bitmap>> = HashMap::new();

        for d in drawables {
            match d {
                Drawable::Text(t) => load_text_font(&mut fonts, t),
                Drawable::WrappedText(w) => {
                    for line in w.lines() {
                        load_text_font(&mut fonts, line);
                    }
                }
                Drawable::Formula(f) => {
                    let cfg = f.config();
                    let key = FormulaKey {
                        formula: cfg.formula.clone(),
                        color: cfg.color,
                    };
                    if formulas.contains_key(&key) {
                        continue;
                    }
                    let raw = coverage
                        .entry(cfg.formula.clone())
                        .or_insert_with(|| render_formula(renderer, &cfg.formula));
                    let tinted = raw.as_ref().map(|b| b.tinted(cfg.color));
                    formulas.insert(key, tinted);
                }
                Drawable::Circle(_) => {}
            }
        }

        tracing::debug!(
            formulas = formulas.len(),
            failed = formulas.values().filter(|b| b.is_none()).count(),
            "assets prepared"
        );
        Self { fonts, formulas }
    }

    /// Loaded fonts.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Tinted bitmap for `formula` in `color`, if it rendered successfully.
    pub fn formula(&self, formula: &str, color: Rgba8) -> Option<&Bitmap> {
        let key = FormulaKey {
            formula: formula.to_owned(),
            color,
        };
        self.formulas.get(&key).and_then(Option::as_ref)
    }
}

fn load_text_font(fonts: &mut FontBook, text: &Text) {
    let Some(path) = text.config().font.as_deref() else {
        return;
    };
    if fonts.contains(path) {
        return;
    }
    if let Err(e) = fonts.load(path) {
        tracing::warn!(font = %path.display(), error = %e, "font unavailable, using default");
    }
}

fn render_formula(renderer: Option<&dyn FormulaRenderer>, formula: &str) -> Option<Bitmap> {
    let Some(renderer) = renderer else {
        tracing::warn!(formula, "no formula renderer configured, formula will be skipped");
        return None;
    };
    match renderer.render(formula) {
        Ok(b) => Some(b),
        Err(e) => {
            tracing::warn!(formula, error = %e, "formula rendering failed, formula will be skipped");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
