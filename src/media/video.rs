use std::path::{Path, PathBuf};

use crate::assets::store::AssetStore;
use crate::compile::CompiledFrames;
use crate::drawable::{Drawable, Render as _};
use crate::encode::ffmpeg::{EncodeConfig, encode_piped};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;
use crate::render::paint::PaintCtx;

#[derive(Clone, Debug, PartialEq)]
/// Basic metadata about a source video file.
pub struct VideoInfo {
    /// Source path used for probing and decoding.
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Average frame rate in frames per second.
    pub frame_rate: f64,
    /// Whether ffprobe detected at least one audio stream.
    pub has_audio: bool,
}

impl VideoInfo {
    /// Frame rate rounded to whole frames per second, at least 1.
    pub fn fps(&self) -> u32 {
        (self.frame_rate.round() as u32).max(1)
    }
}

/// Parse an ffprobe rate such as `30000/1001` or `25`.
pub fn parse_frame_rate(s: &str) -> FrameloomResult<f64> {
    let bad = || FrameloomError::validation(format!("invalid frame rate '{s}'"));
    let rate = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().map_err(|_| bad())?;
            let den: f64 = den.trim().parse().map_err(|_| bad())?;
            if den == 0.0 {
                return Err(bad());
            }
            num / den
        }
        None => s.trim().parse().map_err(|_| bad())?,
    };
    if !rate.is_finite() || rate <= 0.0 {
        return Err(bad());
    }
    Ok(rate)
}

/// Probe source video metadata through `ffprobe`.
pub fn probe_video(source_path: &Path) -> FrameloomResult<VideoInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        avg_frame_rate: Option<String>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(source_path)
        .output()
        .map_err(|e| FrameloomError::external(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(FrameloomError::external(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| FrameloomError::serde(format!("ffprobe json parse failed: {e}")))?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| FrameloomError::validation("no video stream found"))?;
    let width = video
        .width
        .ok_or_else(|| FrameloomError::validation("missing video width from ffprobe"))?;
    let height = video
        .height
        .ok_or_else(|| FrameloomError::validation("missing video height from ffprobe"))?;
    // avg_frame_rate is "0/0" for some containers.
    let frame_rate = [video.avg_frame_rate.as_deref(), video.r_frame_rate.as_deref()]
        .into_iter()
        .flatten()
        .find_map(|r| parse_frame_rate(r).ok())
        .ok_or_else(|| FrameloomError::validation("missing video frame rate from ffprobe"))?;
    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        frame_rate,
        has_audio,
    })
}

/// Decoded video held in memory, frame by frame, for drawing overlays.
#[derive(Clone, Debug)]
pub struct VideoClip {
    info: VideoInfo,
    frames: Vec<Canvas>,
}

impl VideoClip {
    /// Decode every frame of `path` through `ffmpeg`.
    #[tracing::instrument]
    pub fn from_file(path: &Path) -> FrameloomResult<Self> {
        let info = probe_video(path)?;
        let out = std::process::Command::new("ffmpeg")
            .args(["-v", "error", "-i"])
            .arg(path)
            .args(["-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
            .output()
            .map_err(|e| {
                FrameloomError::external(format!("failed to run ffmpeg for video decode: {e}"))
            })?;
        if !out.status.success() {
            return Err(FrameloomError::external(format!(
                "ffmpeg video decode failed for '{}': {}",
                path.display(),
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let frame_len = info.width as usize * info.height as usize * 4;
        if frame_len == 0 || !out.stdout.len().is_multiple_of(frame_len) {
            return Err(FrameloomError::external(format!(
                "decoded video has invalid size: got {} bytes, expected multiples of {frame_len}",
                out.stdout.len()
            )));
        }
        let frames = out
            .stdout
            .chunks_exact(frame_len)
            .map(|px| Canvas::from_straight_rgba8(info.width, info.height, px.to_vec()))
            .collect::<FrameloomResult<Vec<_>>>()?;
        tracing::debug!(frames = frames.len(), "video decoded");
        Ok(Self { info, frames })
    }

    /// Clip from already decoded frames; all must share one size.
    pub fn from_frames(frame_rate: f64, frames: Vec<Canvas>) -> FrameloomResult<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(FrameloomError::validation("frame rate must be finite and > 0"));
        }
        let (width, height) = match frames.first() {
            Some(f) => (f.width(), f.height()),
            None => return Err(FrameloomError::validation("video clip needs at least one frame")),
        };
        if frames.iter().any(|f| f.width() != width || f.height() != height) {
            return Err(FrameloomError::validation(
                "all video frames must share one width/height",
            ));
        }
        Ok(Self {
            info: VideoInfo {
                source_path: PathBuf::new(),
                width,
                height,
                frame_rate,
                has_audio: false,
            },
            frames,
        })
    }

    /// Source metadata.
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Frame `index`, if it exists.
    pub fn frame(&self, index: usize) -> Option<&Canvas> {
        self.frames.get(index)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the clip has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Paint `drawable` onto `count` frames starting at `start`.
    ///
    /// The range is clipped to the clip length. Returns how many frames were painted.
    pub fn overlay(
        &mut self,
        drawable: &Drawable,
        start: usize,
        count: usize,
        assets: &AssetStore,
    ) -> FrameloomResult<usize> {
        let end = start.saturating_add(count).min(self.frames.len());
        let Some(frames) = self.frames.get_mut(start..end) else {
            return Ok(0);
        };
        let mut ctx = PaintCtx::new(assets);
        for frame in frames.iter_mut() {
            drawable.render_to(frame, &mut ctx)?;
        }
        Ok(frames.len())
    }

    /// Paint the `k`-th drawable onto frame `start + k`.
    pub fn overlay_sequence(
        &mut self,
        drawables: &[Drawable],
        start: usize,
        assets: &AssetStore,
    ) -> FrameloomResult<()> {
        let total = self.frames.len();
        let mut ctx = PaintCtx::new(assets);
        for (offset, d) in drawables.iter().enumerate() {
            let index = start.saturating_add(offset);
            let frame = self
                .frames
                .get_mut(index)
                .ok_or_else(|| FrameloomError::out_of_range(index, total))?;
            d.render_to(frame, &mut ctx)?;
        }
        Ok(())
    }

    /// Encode the clip to `out`, optionally muxing `audio`.
    pub fn write(&self, out: &Path, audio: Option<&Path>) -> FrameloomResult<PathBuf> {
        let frames =
            CompiledFrames::from_canvases(self.info.fps(), Rgba8::black(), self.frames.clone())?;
        let mut cfg = EncodeConfig::for_frames(&frames, out);
        if let Some(a) = audio {
            cfg = cfg.with_audio(a);
        }
        encode_piped(&frames, &cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/video.rs"]
mod tests;
