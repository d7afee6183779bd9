use crate::foundation::core::Vec2;

use super::Animatable;

/// Copy of `d` offset by `by`.
pub fn translate<T: Animatable>(d: &T, by: Vec2) -> T {
    d.offset(by)
}

/// Motion toward `by` spread over `frames` instances.
///
/// Instance `i` sits at `position + by / frames * i`: the first instance is the unmoved
/// original and the full displacement is only reached one step after the last one, so
/// chained motions continue from the last element without a repeated frame. With
/// `frames <= 1` the result is a single copy offset by the whole of `by`.
pub fn translate_frames<T: Animatable>(d: &T, by: Vec2, frames: usize) -> Vec<T> {
    if frames <= 1 {
        return vec![d.offset(by)];
    }
    let step = by / frames as f64;
    (0..frames).map(|i| d.offset(step * i as f64)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/motion.rs"]
mod tests;
