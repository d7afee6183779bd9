#![forbid(unsafe_code)]

//! Frameloom: a procedural animation compositor.
//!
//! Drawables (circles, text, rendered formulas) are expanded by pure transform
//! operators into per-frame sequences, placed into fixed frame slots of a
//! [`Timeline`], and compiled into one raster per slot. Compiled frames are then
//! encoded with the system `ffmpeg`.
//!
//! ```no_run
//! use frameloom::{AnimationConfig, Animator, Circle, Point, SaveOpts, Vec2};
//!
//! # fn main() -> frameloom::FrameloomResult<()> {
//! let mut anim = Animator::new(AnimationConfig {
//!     duration: 1.0,
//!     fps: 4,
//!     ..AnimationConfig::default()
//! })?;
//! let ball = frameloom::Drawable::from(Circle::at(Point::new(20.0, 20.0), 10.0));
//! anim.add_frames_objects(0, ball.translate_frames(Vec2::new(100.0, 0.0), 4))?;
//! anim.compile_frames()?;
//! anim.save(
//!     "out.mp4".as_ref(),
//!     &SaveOpts {
//!         mode: frameloom::EncodeMode::Pipe,
//!         ..SaveOpts::default()
//!     },
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod animator;
pub mod assets;
pub mod compile;
pub mod drawable;
pub mod encode;
pub mod foundation;
pub mod media;
pub mod render;
pub mod scene;
pub mod timeline;
pub mod transform;

pub use animator::{Animator, SaveOpts};
pub use assets::bitmap::Bitmap;
pub use assets::fonts::{FontBook, FontMeasure, TextMeasure};
pub use assets::formula::{FormulaRenderer, Tex2Im};
pub use assets::store::AssetStore;
pub use compile::{
    CompileOpts, CompileStats, CompiledFrame, CompiledFrames, compile, compile_with_stats,
};
pub use drawable::{
    Circle, CircleConfig, CircleStyle, Drawable, Formula, FormulaConfig, Render, Text,
    TextConfig, WrapOpts, WrappedText,
};
pub use encode::{EncodeConfig, EncodeMode, FrameDir, resolve_output_path};
pub use foundation::core::{Point, Rect, Rgba8, Vec2};
pub use foundation::error::{FrameloomError, FrameloomResult};
pub use media::{VideoClip, VideoInfo};
pub use render::canvas::Canvas;
pub use render::paint::PaintCtx;
pub use scene::SceneDef;
pub use timeline::{AnimationConfig, Slot, SlotEntry, Timeline};
pub use transform::{Animatable, Reveal};
