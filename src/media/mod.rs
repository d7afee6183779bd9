//! Existing video files as frame sources for overlays.

pub mod video;

pub use video::{VideoClip, VideoInfo, parse_frame_rate, probe_video};
