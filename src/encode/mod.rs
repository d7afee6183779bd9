//! Hand compiled frames to the system `ffmpeg`.
//!
//! Two routes are available: write numbered PNGs into a caller-owned [`FrameDir`]
//! and point `ffmpeg` at the pattern, or stream raw RGBA over stdin.

pub mod ffmpeg;
pub mod frame_dir;
pub mod output;

pub use ffmpeg::{EncodeConfig, EncodeMode, FfmpegEncoder, encode_image_sequence, encode_piped};
pub use frame_dir::FrameDir;
pub use output::resolve_output_path;
