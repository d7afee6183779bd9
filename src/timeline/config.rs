use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FrameloomError, FrameloomResult};

/// Upper bound on [`AnimationConfig::total_frames`]; slots are allocated up front.
pub const MAX_FRAMES: usize = 1 << 24;

/// Output geometry and timing. Fixed once a [`crate::timeline::Timeline`] is built from it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Length in seconds.
    pub duration: f64,
    /// Color every frame starts from.
    pub background: Rgba8,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30,
            duration: 10.0,
            background: Rgba8::black(),
        }
    }
}

impl AnimationConfig {
    /// Number of frame slots: `round(duration * fps)`.
    pub fn total_frames(&self) -> usize {
        (self.duration * f64::from(self.fps)).round() as usize
    }

    /// Reject configurations that cannot produce at least one frame.
    pub fn validate(&self) -> FrameloomResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameloomError::validation(
                "animation width/height must be > 0",
            ));
        }
        if self.fps == 0 {
            return Err(FrameloomError::validation("animation fps must be > 0"));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(FrameloomError::validation(
                "animation duration must be finite and > 0",
            ));
        }
        let frames = self.duration * f64::from(self.fps);
        if !frames.is_finite() || frames.round() > MAX_FRAMES as f64 {
            return Err(FrameloomError::validation(format!(
                "duration {}s at {} fps exceeds the {MAX_FRAMES} frame limit",
                self.duration, self.fps
            )));
        }
        if self.total_frames() == 0 {
            return Err(FrameloomError::validation(format!(
                "duration {}s at {} fps rounds to zero frames",
                self.duration, self.fps
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_reader<R: std::io::Read>(r: R) -> FrameloomResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| FrameloomError::serde(format!("parse animation config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> FrameloomResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FrameloomError::validation(format!("open animation config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/config.rs"]
mod tests;
