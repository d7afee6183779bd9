use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "frameloom", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a scene and encode it to MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Compile a scene and write one frame as a PNG.
    Frame(FrameArgs),
    /// Draw text over a range of frames of an existing video.
    Overlay(OverlayArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Write numbered PNGs and encode them.
    ImageSequence,
    /// Stream raw frames over stdin.
    Pipe,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; normalized to `.mp4`.
    #[arg(long)]
    out: PathBuf,

    /// How frames reach ffmpeg.
    #[arg(long, value_enum, default_value_t = Mode::Pipe)]
    mode: Mode,

    /// Directory for intermediate PNGs (image-sequence mode).
    #[arg(long)]
    frame_dir: Option<PathBuf>,

    /// Audio track; overrides the scene's `audio`.
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Refuse to replace an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Compile slots one at a time.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// `tex2im` executable for formula cues.
    #[arg(long, default_value = "tex2im")]
    tex2im: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// `tex2im` executable for formula cues.
    #[arg(long, default_value = "tex2im")]
    tex2im: PathBuf,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Source video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; normalized to `.mp4`.
    #[arg(long)]
    out: PathBuf,

    /// Text to draw.
    #[arg(long)]
    text: String,

    /// Font file for the text.
    #[arg(long)]
    font: PathBuf,

    /// Font size in pixels.
    #[arg(long, default_value_t = 20.0)]
    size: f32,

    /// Left edge of the text.
    #[arg(long, default_value_t = 50.0)]
    x: f64,

    /// Top edge of the text.
    #[arg(long, default_value_t = 0.0)]
    y: f64,

    /// First frame to draw on.
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Number of frames to draw on.
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Audio track to mux in.
    #[arg(long)]
    audio: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Overlay(args) => cmd_overlay(args),
    }
}

/// Scratch directory for `tex2im` output, removed when the returned value drops.
fn formula_work_dir() -> anyhow::Result<tempfile::TempDir> {
    tempfile::Builder::new()
        .prefix("frameloom_formulas_")
        .tempdir()
        .context("create formula work dir")
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = frameloom::SceneDef::from_path(&args.in_path)?;
    let audio = args.audio.clone().or_else(|| scene.audio.clone());
    let work_dir = formula_work_dir()?;
    let mut anim = scene
        .into_animator()?
        .with_formula_renderer(frameloom::Tex2Im::new(work_dir.path()).with_program(&args.tex2im))
        .with_compile_opts(frameloom::CompileOpts {
            parallel: !args.sequential,
            threads: args.threads,
        });

    let stats = anim.compile_frames()?;
    if stats.skipped > 0 {
        eprintln!("warning: {} drawable(s) failed to paint and were skipped", stats.skipped);
    }

    let opts = frameloom::SaveOpts {
        mode: match args.mode {
            Mode::ImageSequence => frameloom::EncodeMode::ImageSequence,
            Mode::Pipe => frameloom::EncodeMode::Pipe,
        },
        audio,
        frame_dir: args.frame_dir,
        no_overwrite: args.no_overwrite,
    };
    let written = anim.save(&args.out, &opts)?;

    eprintln!("wrote {}", written.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = frameloom::SceneDef::from_path(&args.in_path)?;
    let work_dir = formula_work_dir()?;
    let mut anim = scene
        .into_animator()?
        .with_formula_renderer(frameloom::Tex2Im::new(work_dir.path()).with_program(&args.tex2im));
    anim.compile_frames()?;
    let canvas = anim.compiled_frame(args.frame)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    canvas.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let fonts = frameloom::FontBook::with_default(&args.font)?;
    let assets = frameloom::AssetStore::new(fonts);
    let text = frameloom::Text::new(frameloom::TextConfig {
        text: args.text,
        size: args.size,
        position: frameloom::Point::new(args.x, args.y),
        ..frameloom::TextConfig::default()
    });

    let mut clip = frameloom::VideoClip::from_file(&args.in_path)?;
    let painted = clip.overlay(&text.into(), args.start, args.count, &assets)?;
    let written = clip.write(&args.out, args.audio.as_deref())?;

    eprintln!("painted {painted} frame(s), wrote {}", written.display());
    Ok(())
}
