//! External inputs resolved before compile: font bytes, formula bitmaps.
//!
//! Renderers never touch the filesystem or spawn tools; everything they need is
//! front-loaded into an [`store::AssetStore`].

pub mod bitmap;
pub mod fonts;
pub mod formula;
pub mod store;
