use rayon::prelude::*;

use crate::assets::store::AssetStore;
use crate::drawable::Render as _;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;
use crate::render::paint::PaintCtx;
use crate::timeline::{AnimationConfig, Slot, Timeline};

#[derive(Clone, Debug)]
/// Threading controls for the compile pass.
pub struct CompileOpts {
    /// Compile slots on a worker pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for CompileOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The raster produced for one slot.
pub struct CompiledFrame {
    /// Slot index this frame was compiled from.
    pub index: usize,
    /// Final pixels.
    pub canvas: Canvas,
}

#[derive(Clone, Debug)]
/// Every compiled frame, in slot order, plus the geometry needed to encode them.
pub struct CompiledFrames {
    fps: u32,
    width: u32,
    height: u32,
    background: Rgba8,
    frames: Vec<CompiledFrame>,
}

impl CompiledFrames {
    /// Assemble from already rendered canvases; each must match the given size.
    pub fn from_canvases(
        fps: u32,
        background: Rgba8,
        canvases: Vec<Canvas>,
    ) -> FrameloomResult<Self> {
        let (width, height) = match canvases.first() {
            Some(c) => (c.width(), c.height()),
            None => return Err(FrameloomError::validation("no frames to assemble")),
        };
        if canvases
            .iter()
            .any(|c| c.width() != width || c.height() != height)
        {
            return Err(FrameloomError::validation(
                "all frames must share one width/height",
            ));
        }
        let frames = canvases
            .into_iter()
            .enumerate()
            .map(|(index, canvas)| CompiledFrame { index, canvas })
            .collect();
        Ok(Self {
            fps,
            width,
            height,
            background,
            frames,
        })
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Background the frames were compiled over.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Frame `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&CompiledFrame> {
        self.frames.get(index)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledFrame> {
        self.frames.iter()
    }

    /// Frames as a slice.
    pub fn frames(&self) -> &[CompiledFrame] {
        &self.frames
    }
}

impl<'a> IntoIterator for &'a CompiledFrames {
    type Item = &'a CompiledFrame;
    type IntoIter = std::slice::Iter<'a, CompiledFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters from one compile pass.
pub struct CompileStats {
    /// Slots compiled.
    pub frames: usize,
    /// Drawables painted successfully.
    pub painted: usize,
    /// Drawables whose paint failed and were skipped.
    pub skipped: usize,
}

impl CompileStats {
    fn add(&mut self, other: Self) {
        self.frames += other.frames;
        self.painted += other.painted;
        self.skipped += other.skipped;
    }
}

/// Compile every slot of `timeline`.
pub fn compile(
    timeline: &Timeline,
    assets: &AssetStore,
    opts: &CompileOpts,
) -> FrameloomResult<CompiledFrames> {
    compile_with_stats(timeline, assets, opts).map(|(frames, _)| frames)
}

/// Same as [`compile`], also returning paint counters.
///
/// A drawable that fails to paint is logged and skipped; the rest of its slot and
/// every other slot still compile.
#[tracing::instrument(skip_all, fields(frames = timeline.total_frames(), parallel = opts.parallel))]
pub fn compile_with_stats(
    timeline: &Timeline,
    assets: &AssetStore,
    opts: &CompileOpts,
) -> FrameloomResult<(CompiledFrames, CompileStats)> {
    let cfg = timeline.config();
    let slots = timeline.slots();

    let compiled: Vec<FrameloomResult<(Canvas, CompileStats)>> = if opts.parallel && slots.len() > 1
    {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            slots
                .par_iter()
                .enumerate()
                .map_init(
                    || PaintCtx::new(assets),
                    |ctx, (index, slot)| compile_slot(cfg, index, slot, ctx),
                )
                .collect()
        })
    } else {
        let mut ctx = PaintCtx::new(assets);
        slots
            .iter()
            .enumerate()
            .map(|(index, slot)| compile_slot(cfg, index, slot, &mut ctx))
            .collect()
    };

    let mut stats = CompileStats::default();
    let mut frames = Vec::with_capacity(compiled.len());
    for (index, item) in compiled.into_iter().enumerate() {
        let (canvas, slot_stats) = item?;
        stats.add(slot_stats);
        frames.push(CompiledFrame { index, canvas });
    }
    tracing::debug!(?stats, "compile finished");

    Ok((
        CompiledFrames {
            fps: cfg.fps,
            width: cfg.width,
            height: cfg.height,
            background: cfg.background,
            frames,
        },
        stats,
    ))
}

fn compile_slot(
    cfg: &AnimationConfig,
    index: usize,
    slot: &Slot,
    ctx: &mut PaintCtx<'_>,
) -> FrameloomResult<(Canvas, CompileStats)> {
    let mut canvas = Canvas::new(cfg.width, cfg.height, cfg.background)?;
    let mut stats = CompileStats {
        frames: 1,
        ..CompileStats::default()
    };
    for d in slot.drawables() {
        match d.render_to(&mut canvas, ctx) {
            Ok(()) => stats.painted += 1,
            Err(e) => {
                tracing::warn!(frame = index, kind = d.kind(), error = %e, "drawable skipped");
                stats.skipped += 1;
            }
        }
    }
    Ok((canvas, stats))
}

fn build_thread_pool(threads: Option<usize>) -> FrameloomResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FrameloomError::validation(
            "compile 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FrameloomError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
