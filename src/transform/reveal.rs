use super::Reveal;

/// Characters visible in each of `frames` reveal steps over `len` characters.
///
/// With more characters than frames each step rounds down, with fewer it rounds up,
/// and with exactly one per frame it is `i + 1`. The last step always shows all `len`.
pub fn revealed_counts(len: usize, frames: usize) -> Vec<usize> {
    (1..=frames)
        .map(|step| {
            let scaled = step * len;
            if len >= frames {
                scaled / frames
            } else {
                scaled.div_ceil(frames)
            }
        })
        .collect()
}

/// Reveal `d` a few characters per frame; see [`revealed_counts`].
///
/// A drawable with nothing to reveal yields `frames` unchanged copies.
pub fn roll<T: Reveal>(d: &T, frames: usize) -> Vec<T> {
    let len = d.char_len();
    if len == 0 {
        return vec![d.clone(); frames];
    }
    revealed_counts(len, frames)
        .into_iter()
        .map(|n| d.reveal(n))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/reveal.rs"]
mod tests;
