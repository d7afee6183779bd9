use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::{Rgba8, premultiply_rgba8_in_place};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::foundation::math::mul_div255_u8;

/// Decoded premultiplied RGBA8 image, cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, row-major.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Build from straight-alpha RGBA8 bytes.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> FrameloomResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(FrameloomError::validation(format!(
                "bitmap byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        premultiply_rgba8_in_place(&mut data);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    /// Decode encoded image bytes (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> FrameloomResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight_rgba8(width, height, rgba.into_raw())
    }

    /// Recolor using the alpha channel as coverage: every pixel becomes `color`, with
    /// alpha scaled by the source alpha.
    pub fn tinted(&self, color: Rgba8) -> Self {
        let mut out = Vec::with_capacity(self.rgba8_premul.len());
        for px in self.rgba8_premul.chunks_exact(4) {
            let a = mul_div255_u8(u16::from(px[3]), u16::from(color.a));
            out.extend_from_slice(&color.with_alpha(a).to_premul());
        }
        Self {
            width: self.width,
            height: self.height,
            rgba8_premul: Arc::new(out),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bitmap.rs"]
mod tests;
