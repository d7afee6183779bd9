use std::ffi::OsString;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::compile::CompiledFrames;
use crate::encode::frame_dir::FrameDir;
use crate::encode::output::resolve_output_path;
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;
use crate::render::composite::flatten_premul_over_bg_to_opaque_rgba8;

/// How frames reach `ffmpeg`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodeMode {
    /// Numbered PNG files in a [`FrameDir`].
    #[default]
    ImageSequence,
    /// Raw RGBA frames streamed over stdin.
    Pipe,
}

/// Output settings for one encode.
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Frame width in pixels; must be even.
    pub width: u32,
    /// Frame height in pixels; must be even.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Requested output path, normalized by [`resolve_output_path`].
    pub out_path: PathBuf,
    /// Optional audio track; the output ends with the shorter of video and audio.
    pub audio: Option<PathBuf>,
    /// Overwrite an existing output file.
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Settings matching `frames`, writing to `out_path`.
    pub fn for_frames(frames: &CompiledFrames, out_path: impl Into<PathBuf>) -> Self {
        Self {
            width: frames.width(),
            height: frames.height(),
            fps: frames.fps(),
            out_path: out_path.into(),
            audio: None,
            overwrite: true,
        }
    }

    /// Mux `audio` into the output.
    pub fn with_audio(mut self, audio: impl Into<PathBuf>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    /// Check geometry and inputs.
    pub fn validate(&self) -> FrameloomResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameloomError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(FrameloomError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(FrameloomError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if let Some(audio) = self.audio.as_deref()
            && !audio.is_file()
        {
            return Err(FrameloomError::validation(format!(
                "audio file '{}' does not exist",
                audio.display()
            )));
        }
        Ok(())
    }

    /// Final output path.
    pub fn resolved_out_path(&self) -> FrameloomResult<PathBuf> {
        resolve_output_path(&self.out_path)
    }
}

/// `ffmpeg` arguments for encoding the first `frames` PNG files matching `pattern` into
/// `out`.
///
/// The frame cap keeps leftover files from an earlier, longer run in the same directory
/// out of the video.
pub fn image_sequence_args(
    cfg: &EncodeConfig,
    pattern: &Path,
    frames: usize,
    out: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        overwrite_flag(cfg).into(),
        "-loglevel".into(),
        "error".into(),
        "-framerate".into(),
        cfg.fps.to_string().into(),
        "-start_number".into(),
        "0".into(),
        "-i".into(),
        pattern.as_os_str().to_owned(),
        "-frames:v".into(),
        frames.to_string().into(),
    ];
    push_output_args(&mut args, cfg, out);
    args
}

/// `ffmpeg` arguments for encoding raw RGBA frames read from stdin into `out`.
pub fn pipe_args(cfg: &EncodeConfig, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        overwrite_flag(cfg).into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgba".into(),
        "-s".into(),
        format!("{}x{}", cfg.width, cfg.height).into(),
        "-r".into(),
        cfg.fps.to_string().into(),
        "-i".into(),
        "pipe:0".into(),
    ];
    push_output_args(&mut args, cfg, out);
    args
}

fn overwrite_flag(cfg: &EncodeConfig) -> &'static str {
    if cfg.overwrite { "-y" } else { "-n" }
}

fn push_output_args(args: &mut Vec<OsString>, cfg: &EncodeConfig, out: &Path) {
    if let Some(audio) = cfg.audio.as_deref() {
        args.push("-i".into());
        args.push(audio.as_os_str().to_owned());
    }
    for a in ["-c:v", "libx264", "-pix_fmt", "yuv420p"] {
        args.push(a.into());
    }
    if cfg.audio.is_some() {
        for a in ["-c:a", "aac", "-shortest"] {
            args.push(a.into());
        }
    } else {
        args.push("-an".into());
    }
    for a in ["-movflags", "+faststart"] {
        args.push(a.into());
    }
    args.push(out.as_os_str().to_owned());
}

/// Write `frames` into `dir` and encode them.
///
/// The frame files are removed after a successful encode. If `ffmpeg` fails they are
/// left in `dir` for inspection or a retry.
#[tracing::instrument(skip_all, fields(frames = frames.len()))]
pub fn encode_image_sequence(
    frames: &CompiledFrames,
    cfg: &EncodeConfig,
    dir: &mut FrameDir,
) -> FrameloomResult<PathBuf> {
    let out = prepare(frames, cfg)?;
    dir.write_frames(frames)?;

    let args = image_sequence_args(cfg, &dir.pattern(), frames.len(), &out);
    tracing::debug!(?args, "running ffmpeg");
    let output = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .output()
        .map_err(|e| {
            FrameloomError::external(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
    if !output.status.success() {
        return Err(FrameloomError::external(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    dir.cleanup()?;
    Ok(out)
}

/// Stream `frames` to `ffmpeg` over stdin.
#[tracing::instrument(skip_all, fields(frames = frames.len()))]
pub fn encode_piped(frames: &CompiledFrames, cfg: &EncodeConfig) -> FrameloomResult<PathBuf> {
    let out = prepare(frames, cfg)?;
    let mut enc = FfmpegEncoder::spawn(cfg, &out, frames.background().into())?;
    for frame in frames {
        enc.encode_frame(&frame.canvas)?;
    }
    enc.finish()?;
    Ok(out)
}

fn prepare(frames: &CompiledFrames, cfg: &EncodeConfig) -> FrameloomResult<PathBuf> {
    if frames.is_empty() {
        return Err(FrameloomError::precondition("no compiled frames to encode"));
    }
    if frames.width() != cfg.width || frames.height() != cfg.height {
        return Err(FrameloomError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frames.width(),
            frames.height(),
            cfg.width,
            cfg.height
        )));
    }
    cfg.validate()?;
    let out = cfg.resolved_out_path()?;
    ensure_parent_dir(&out)?;
    if !cfg.overwrite && out.exists() {
        return Err(FrameloomError::validation(format!(
            "output file '{}' already exists",
            out.display()
        )));
    }
    if !is_ffmpeg_on_path() {
        return Err(FrameloomError::external(
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }
    Ok(out)
}

/// Running `ffmpeg` process fed raw frames over stdin.
pub struct FfmpegEncoder {
    width: u32,
    height: u32,
    bg_rgba: [u8; 4],
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    /// Start `ffmpeg` writing to `out`. Transparent pixels are flattened over `bg_rgba`.
    pub fn spawn(cfg: &EncodeConfig, out: &Path, bg_rgba: [u8; 4]) -> FrameloomResult<Self> {
        cfg.validate()?;
        let mut child = Command::new("ffmpeg")
            .args(pipe_args(cfg, out))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                FrameloomError::external(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| FrameloomError::external("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| FrameloomError::external("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        Ok(Self {
            width: cfg.width,
            height: cfg.height,
            bg_rgba,
            child,
            stdin: Some(stdin),
            stderr_drain: Some(stderr_drain),
            scratch: vec![0u8; cfg.width as usize * cfg.height as usize * 4],
        })
    }

    /// Flatten and write one frame.
    pub fn encode_frame(&mut self, canvas: &Canvas) -> FrameloomResult<()> {
        if canvas.width() != self.width || canvas.height() != self.height {
            return Err(FrameloomError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                canvas.width(),
                canvas.height(),
                self.width,
                self.height
            )));
        }
        flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, canvas.data(), self.bg_rgba)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(FrameloomError::external("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            FrameloomError::external(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    /// Close stdin and wait for `ffmpeg` to exit.
    pub fn finish(mut self) -> FrameloomResult<()> {
        drop(self.stdin.take());
        let status = self.child.wait().map_err(|e| {
            FrameloomError::external(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| FrameloomError::external("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| FrameloomError::external(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            return Err(FrameloomError::external(format!(
                "ffmpeg exited with status {}: {}",
                status,
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(())
    }
}

/// Opaque straight RGBA8 copy of `canvas`, flattened over `bg_rgba`.
pub fn flatten_canvas(canvas: &Canvas, bg_rgba: [u8; 4]) -> FrameloomResult<Vec<u8>> {
    let mut out = vec![0u8; canvas.data().len()];
    flatten_premul_over_bg_to_opaque_rgba8(&mut out, canvas.data(), bg_rgba)?;
    Ok(out)
}

/// Return `true` if an `ffmpeg` executable is callable.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> FrameloomResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
