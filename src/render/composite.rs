use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u16, opacity_to_u8};

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel, with `src` additionally scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = opacity_to_u8(opacity);
    let sa = mul_div255_u16(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - sa;

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u16(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u16(u16::from(src[i]), op);
        let dc = mul_div255_u16(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite a full-size premultiplied overlay onto `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> FrameloomResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(FrameloomError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Geometry of a sub-image placed onto a larger buffer.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    /// Destination buffer width in pixels.
    pub dst_width: u32,
    /// Destination buffer height in pixels.
    pub dst_height: u32,
    /// Source image width in pixels.
    pub src_width: u32,
    /// Source image height in pixels.
    pub src_height: u32,
    /// Top-left destination pixel of the source image (may be negative).
    pub x: i64,
    /// Top-left destination pixel of the source image (may be negative).
    pub y: i64,
}

/// Composite a smaller premultiplied image onto `dst` at an integer offset, clipping to bounds.
pub fn over_at(dst: &mut [u8], src: &[u8], at: Placement, opacity: f32) -> FrameloomResult<()> {
    let dst_len = at.dst_width as usize * at.dst_height as usize * 4;
    let src_len = at.src_width as usize * at.src_height as usize * 4;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(FrameloomError::validation(
            "over_at buffer sizes do not match their declared dimensions",
        ));
    }

    let x0 = at.x.max(0);
    let y0 = at.y.max(0);
    let x1 = (at.x + i64::from(at.src_width)).min(i64::from(at.dst_width));
    let y1 = (at.y + i64::from(at.src_height)).min(i64::from(at.dst_height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for dy in y0..y1 {
        let sy = (dy - at.y) as usize;
        for dx in x0..x1 {
            let sx = (dx - at.x) as usize;
            let si = (sy * at.src_width as usize + sx) * 4;
            let di = (dy as usize * at.dst_width as usize + dx as usize) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            if s[3] == 0 {
                continue;
            }
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over(d, s, opacity));
        }
    }
    Ok(())
}

/// Flatten premultiplied pixels over an opaque straight-alpha background.
pub fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> FrameloomResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(FrameloomError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = add_sat_u8(u16::from(s[0]), mul_div255_u16(bg_r, inv));
        d[1] = add_sat_u8(u16::from(s[1]), mul_div255_u16(bg_g, inv));
        d[2] = add_sat_u8(u16::from(s[2]), mul_div255_u16(bg_b, inv));
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
