//! CPU rasterization: the frame canvas, premultiplied compositing and per-worker
//! paint state.

pub mod canvas;
pub mod composite;
pub mod paint;
