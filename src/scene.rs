//! JSON scene documents: a config, fonts and a list of animated cues.
//!
//! Each cue starts from one drawable, optionally wraps it, then runs its `animate`
//! steps in order. Every step starts from the last instance the previous step
//! produced, and the resulting instances fill consecutive slots from `start`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::animator::Animator;
use crate::assets::fonts::{FontBook, FontMeasure};
use crate::drawable::{
    Circle, CircleConfig, Drawable, Formula, FormulaConfig, Text, TextConfig, WrapOpts,
    WrappedText,
};
use crate::foundation::core::Vec2;
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::timeline::{AnimationConfig, Timeline};

/// Top-level scene document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// Geometry and timing.
    #[serde(default)]
    pub config: AnimationConfig,
    /// Fonts to load before building text.
    #[serde(default)]
    pub fonts: FontsDef,
    /// Audio track muxed in on render.
    #[serde(default)]
    pub audio: Option<PathBuf>,
    /// Animated placements.
    #[serde(default)]
    pub cues: Vec<CueDef>,
}

/// Font files referenced by a scene.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsDef {
    /// Font used by text without an explicit `font`.
    pub default: Option<PathBuf>,
    /// Additional fonts to preload.
    pub extra: Vec<PathBuf>,
}

/// Drawable kinds a cue can start from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawableDef {
    /// A circle.
    Circle(CircleConfig),
    /// A line of text; wrap it with the cue's `wrap`.
    Text(TextConfig),
    /// A rendered formula.
    Formula(FormulaConfig),
}

/// One animation step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum AnimateOp {
    /// Move by `by` across `frames` slots.
    Translate {
        /// Total displacement.
        by: Vec2,
        /// Number of instances; `1` jumps straight to the offset.
        #[serde(default = "one")]
        frames: usize,
    },
    /// Fade from `from` up toward `to`.
    FadeIn {
        /// Number of instances.
        frames: usize,
        /// Starting opacity.
        #[serde(default)]
        from: f64,
        /// Target opacity.
        #[serde(default = "one_f64")]
        to: f64,
    },
    /// Fade from `from` down toward `to`.
    FadeOut {
        /// Number of instances.
        frames: usize,
        /// Starting opacity.
        #[serde(default = "one_f64")]
        from: f64,
        /// Target opacity.
        #[serde(default)]
        to: f64,
    },
    /// Reveal text a few characters per frame.
    Roll {
        /// Number of instances.
        frames: usize,
    },
    /// Keep the drawable still.
    Hold {
        /// Number of instances.
        frames: usize,
    },
}

fn one() -> usize {
    1
}

fn one_f64() -> f64 {
    1.0
}

/// Line wrapping for a text cue.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrapDef {
    /// Right edge lines must fit within.
    pub max_width: f64,
    /// Extra space between lines.
    #[serde(default)]
    pub line_gap: f64,
}

/// A drawable, its animation, and the slot it starts in.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CueDef {
    /// First slot index.
    #[serde(default)]
    pub start: usize,
    /// Starting drawable.
    pub drawable: DrawableDef,
    /// Wrap text before animating.
    #[serde(default)]
    pub wrap: Option<WrapDef>,
    /// Steps run in order; empty places the drawable once.
    #[serde(default)]
    pub animate: Vec<AnimateOp>,
}

impl CueDef {
    /// Per-slot instances in placement order.
    pub fn expand(&self, measure: &mut FontMeasure<'_>) -> FrameloomResult<Vec<Drawable>> {
        let base = self.base_drawable(measure)?;
        if self.animate.is_empty() {
            return Ok(vec![base]);
        }

        let mut out: Vec<Drawable> = Vec::new();
        for op in &self.animate {
            let from = out.last().unwrap_or(&base).clone();
            let step = match *op {
                AnimateOp::Translate { by, frames } => from.translate_frames(by, frames),
                AnimateOp::FadeIn { frames, from: s, to } => from.fade_in(frames, s, to)?,
                AnimateOp::FadeOut { frames, from: s, to } => from.fade_out(frames, s, to)?,
                AnimateOp::Roll { frames } => from.roll(frames),
                AnimateOp::Hold { frames } => from.hold(frames),
            };
            out.extend(step);
        }
        Ok(out)
    }

    fn base_drawable(&self, measure: &mut FontMeasure<'_>) -> FrameloomResult<Drawable> {
        match (&self.drawable, self.wrap) {
            (DrawableDef::Circle(c), None) => Ok(Circle::new(c.clone()).into()),
            (DrawableDef::Formula(f), None) => Ok(Formula::new(f.clone()).into()),
            (DrawableDef::Text(t), None) => Ok(Text::new(t.clone()).into()),
            (DrawableDef::Text(t), Some(w)) => {
                let opts = WrapOpts {
                    max_width: w.max_width,
                    line_gap: w.line_gap,
                };
                Ok(WrappedText::wrap(&Text::new(t.clone()), opts, measure)?.into())
            }
            (DrawableDef::Circle(_) | DrawableDef::Formula(_), Some(_)) => Err(
                FrameloomError::validation("'wrap' is only supported on text cues"),
            ),
        }
    }
}

impl SceneDef {
    /// Parse a scene document.
    pub fn from_reader<R: std::io::Read>(r: R) -> FrameloomResult<Self> {
        let def: Self = serde_json::from_reader(r)
            .map_err(|e| FrameloomError::serde(format!("parse scene JSON: {e}")))?;
        def.config.validate()?;
        Ok(def)
    }

    /// Parse a scene file; relative font and audio paths resolve against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> FrameloomResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FrameloomError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        let mut def = Self::from_reader(BufReader::new(f))?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        def.resolve_paths(root);
        Ok(def)
    }

    /// Rewrite relative paths as `root.join(path)`.
    pub fn resolve_paths(&mut self, root: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        if let Some(p) = self.fonts.default.as_mut() {
            fix(p);
        }
        self.fonts.extra.iter_mut().for_each(|p| fix(p));
        if let Some(p) = self.audio.as_mut() {
            fix(p);
        }
        for cue in &mut self.cues {
            if let DrawableDef::Text(t) = &mut cue.drawable
                && let Some(p) = t.font.as_mut()
            {
                fix(p);
            }
        }
    }

    /// Load every font the scene names.
    pub fn load_fonts(&self) -> FrameloomResult<FontBook> {
        let mut book = FontBook::new();
        for p in &self.fonts.extra {
            book.load(p)?;
        }
        for cue in &self.cues {
            if let DrawableDef::Text(t) = &cue.drawable
                && let Some(p) = t.font.as_deref()
            {
                book.load(p)?;
            }
        }
        if let Some(p) = self.fonts.default.as_deref() {
            book.load(p)?;
            book.set_default(p)?;
        }
        Ok(book)
    }

    /// Expand every cue into a timeline.
    #[tracing::instrument(skip_all, fields(cues = self.cues.len()))]
    pub fn build_timeline(&self, fonts: &FontBook) -> FrameloomResult<Timeline> {
        let mut timeline = Timeline::new(self.config.clone())?;
        let mut measure = FontMeasure::new(fonts);
        for cue in &self.cues {
            let instances = cue.expand(&mut measure)?;
            timeline.place_sequence(cue.start, instances)?;
        }
        Ok(timeline)
    }

    /// Load fonts and build an [`Animator`] ready to compile.
    pub fn into_animator(self) -> FrameloomResult<Animator> {
        let fonts = self.load_fonts()?;
        let timeline = self.build_timeline(&fonts)?;
        Ok(Animator::from_timeline(timeline).with_fonts(fonts))
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
