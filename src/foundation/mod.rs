//! Shared primitives: geometry, colors, fixed-point math and the error taxonomy.

pub mod core;
pub mod error;
pub(crate) mod math;
