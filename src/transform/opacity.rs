use crate::foundation::error::{FrameloomError, FrameloomResult};

use super::Animatable;

/// Linear fade from `start` up toward `end`.
///
/// Instance `i` has opacity `start + (end - start) / frames * i`; the last instance
/// stops one increment short of `end`.
pub fn fade_in<T: Animatable>(
    d: &T,
    frames: usize,
    start: f64,
    end: f64,
) -> FrameloomResult<Vec<T>> {
    check_frames("fade_in", frames)?;
    if start.is_nan() || end.is_nan() || start >= end {
        return Err(FrameloomError::precondition(format!(
            "fade_in requires start opacity < final opacity (got {start} -> {end})"
        )));
    }
    Ok(ramp(d, frames, start, end))
}

/// Linear fade from `start` down toward `end`, with the same endpoint rule as [`fade_in`].
pub fn fade_out<T: Animatable>(
    d: &T,
    frames: usize,
    start: f64,
    end: f64,
) -> FrameloomResult<Vec<T>> {
    check_frames("fade_out", frames)?;
    if start.is_nan() || end.is_nan() || start <= end {
        return Err(FrameloomError::precondition(format!(
            "fade_out requires start opacity > final opacity (got {start} -> {end})"
        )));
    }
    Ok(ramp(d, frames, start, end))
}

/// `frames` identical copies, for holding a drawable still.
pub fn hold<T: Clone>(d: &T, frames: usize) -> Vec<T> {
    vec![d.clone(); frames]
}

fn check_frames(op: &str, frames: usize) -> FrameloomResult<()> {
    if frames == 0 {
        return Err(FrameloomError::precondition(format!(
            "{op} requires at least one frame"
        )));
    }
    Ok(())
}

fn ramp<T: Animatable>(d: &T, frames: usize, start: f64, end: f64) -> Vec<T> {
    let inc = (end - start) / frames as f64;
    (0..frames)
        .map(|i| d.with_opacity(start + inc * i as f64))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/opacity.rs"]
mod tests;
