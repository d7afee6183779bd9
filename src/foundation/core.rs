pub use kurbo::{Point, Rect, Vec2};

/// Straight-alpha RGBA8 color, as supplied by callers and stored on drawables.
///
/// Serialized as a `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Opaque black.
    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Same color with the alpha channel replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha set from a unit opacity.
    ///
    /// The opacity is scaled by 255 and truncated toward zero, so `0.999` maps to 254.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (255.0 * opacity).clamp(0.0, 255.0) as u8;
        self.with_alpha(a)
    }

    /// Alpha as a unit opacity in `[0, 1]`.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Convert into premultiplied RGBA8 bytes.
    pub fn to_premul(self) -> [u8; 4] {
        premultiply([self.r, self.g, self.b, self.a])
    }

    /// Recover a straight-alpha color from premultiplied RGBA8 bytes.
    pub fn from_premul(px: [u8; 4]) -> Self {
        let [r, g, b, a] = unpremultiply(px);
        Self { r, g, b, a }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Premultiply one straight-alpha RGBA8 pixel.
pub fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    let premul = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), a);
    [premul(px[0]), premul(px[1]), premul(px[2]), px[3]]
}

/// Undo premultiplication of one RGBA8 pixel.
pub fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let unpremul = |c: u8| (((u32::from(c) * 255) + a / 2) / a).min(255) as u8;
    [unpremul(px[0]), unpremul(px[1]), unpremul(px[2]), px[3]]
}

/// Premultiply a tightly packed RGBA8 buffer in place.
pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = premultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
