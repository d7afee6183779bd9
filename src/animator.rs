use std::path::{Path, PathBuf};

use crate::assets::fonts::{FontBook, FontMeasure};
use crate::assets::formula::FormulaRenderer;
use crate::assets::store::AssetStore;
use crate::compile::{CompileOpts, CompileStats, CompiledFrames, compile_with_stats};
use crate::encode::ffmpeg::{EncodeConfig, EncodeMode, encode_image_sequence, encode_piped};
use crate::encode::frame_dir::FrameDir;
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;
use crate::timeline::{AnimationConfig, SlotEntry, Timeline};

/// Options for [`Animator::save`].
#[derive(Clone, Debug, Default)]
pub struct SaveOpts {
    /// How frames are handed to `ffmpeg`.
    pub mode: EncodeMode,
    /// Audio track to mux in.
    pub audio: Option<PathBuf>,
    /// Directory for intermediate PNGs; required for [`EncodeMode::ImageSequence`].
    pub frame_dir: Option<PathBuf>,
    /// Refuse to replace an existing output file when `true`.
    pub no_overwrite: bool,
}

/// Timeline, assets and compiled output bundled behind one object.
///
/// Adding drawables after [`Animator::compile_frames`] discards the compiled frames,
/// so [`Animator::save`] always encodes the current timeline.
pub struct Animator {
    timeline: Timeline,
    fonts: FontBook,
    formula_renderer: Option<Box<dyn FormulaRenderer>>,
    compile_opts: CompileOpts,
    compiled: Option<CompiledFrames>,
}

impl Animator {
    /// Empty animation for `config`.
    pub fn new(config: AnimationConfig) -> FrameloomResult<Self> {
        Ok(Self::from_timeline(Timeline::new(config)?))
    }

    /// Wrap an already populated timeline.
    pub fn from_timeline(timeline: Timeline) -> Self {
        Self {
            timeline,
            fonts: FontBook::new(),
            formula_renderer: None,
            compile_opts: CompileOpts::default(),
            compiled: None,
        }
    }

    /// Use `fonts` for text.
    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self.compiled = None;
        self
    }

    /// Render formulas with `renderer`.
    pub fn with_formula_renderer(mut self, renderer: impl FormulaRenderer + 'static) -> Self {
        self.formula_renderer = Some(Box::new(renderer));
        self.compiled = None;
        self
    }

    /// Override threading for [`Animator::compile_frames`].
    pub fn with_compile_opts(mut self, opts: CompileOpts) -> Self {
        self.compile_opts = opts;
        self
    }

    /// Geometry and timing.
    pub fn config(&self) -> &AnimationConfig {
        self.timeline.config()
    }

    /// The frame slots.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Loaded fonts.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Text measurement over the loaded fonts, for wrapping.
    pub fn measure(&self) -> FontMeasure<'_> {
        FontMeasure::new(&self.fonts)
    }

    /// Append to slot `index`; see [`Timeline::place`].
    pub fn add_frame_object(
        &mut self,
        index: usize,
        entry: impl Into<SlotEntry>,
    ) -> FrameloomResult<()> {
        self.compiled = None;
        self.timeline.place(index, entry)
    }

    /// Place consecutive items from `start`; see [`Timeline::place_sequence`].
    pub fn add_frames_objects<I>(&mut self, start: usize, entries: I) -> FrameloomResult<()>
    where
        I: IntoIterator,
        I::Item: Into<SlotEntry>,
    {
        self.compiled = None;
        self.timeline.place_sequence(start, entries)
    }

    /// Resolve assets and rasterize every slot.
    pub fn compile_frames(&mut self) -> FrameloomResult<CompileStats> {
        let assets = AssetStore::prepare(
            self.fonts.clone(),
            &self.timeline,
            self.formula_renderer.as_deref(),
        );
        let (frames, stats) = compile_with_stats(&self.timeline, &assets, &self.compile_opts)?;
        self.compiled = Some(frames);
        Ok(stats)
    }

    /// Compiled frames, if [`Animator::compile_frames`] ran since the last change.
    pub fn compiled(&self) -> Option<&CompiledFrames> {
        self.compiled.as_ref()
    }

    /// Canvas of compiled frame `index`.
    pub fn compiled_frame(&self, index: usize) -> FrameloomResult<&Canvas> {
        let frames = self.require_compiled()?;
        frames
            .get(index)
            .map(|f| &f.canvas)
            .ok_or_else(|| FrameloomError::out_of_range(index, frames.len()))
    }

    /// Encode the compiled frames to `out` (normalized to `.mp4`); returns the written path.
    ///
    /// If an image-sequence encode fails, the intermediate PNGs are kept in
    /// `opts.frame_dir`.
    pub fn save(&self, out: &Path, opts: &SaveOpts) -> FrameloomResult<PathBuf> {
        let frames = self.require_compiled()?;
        let mut cfg = EncodeConfig::for_frames(frames, out);
        cfg.overwrite = !opts.no_overwrite;
        if let Some(audio) = opts.audio.as_deref() {
            cfg = cfg.with_audio(audio);
        }

        match opts.mode {
            EncodeMode::Pipe => encode_piped(frames, &cfg),
            EncodeMode::ImageSequence => {
                let root = opts.frame_dir.as_deref().ok_or_else(|| {
                    FrameloomError::precondition(
                        "image-sequence encoding requires a frame directory",
                    )
                })?;
                let mut dir = FrameDir::new(root)?;
                match encode_image_sequence(frames, &cfg, &mut dir) {
                    Ok(path) => Ok(path),
                    Err(e) => {
                        if !dir.written().is_empty() {
                            let kept = dir.persist();
                            tracing::warn!(dir = %kept.display(), "encode failed, frame files kept");
                        }
                        Err(e)
                    }
                }
            }
        }
    }

    fn require_compiled(&self) -> FrameloomResult<&CompiledFrames> {
        self.compiled.as_ref().ok_or_else(|| {
            FrameloomError::precondition("frames were never compiled; call compile_frames first")
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/animator.rs"]
mod tests;
