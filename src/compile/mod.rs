//! Rasterize every timeline slot into a [`CompiledFrame`].

mod compiler;

pub use compiler::{
    CompileOpts, CompileStats, CompiledFrame, CompiledFrames, compile, compile_with_stats,
};
