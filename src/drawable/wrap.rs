use crate::assets::fonts::TextMeasure;
use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::canvas::Canvas;
use crate::render::paint::PaintCtx;
use crate::transform::{Animatable, Reveal};

use super::Render;
use super::text::Text;

/// Line-breaking parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrapOpts {
    /// Right edge, in canvas pixels, that no line may extend past.
    pub max_width: f64,
    /// Extra vertical space between consecutive lines.
    #[serde(default)]
    pub line_gap: f64,
}

impl WrapOpts {
    /// Wrap at `max_width` with no extra line gap.
    pub fn new(max_width: f64) -> Self {
        Self {
            max_width,
            line_gap: 0.0,
        }
    }
}

/// Text broken into lines, each line its own [`Text`] stacked below the previous one.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedText {
    source: Text,
    lines: Vec<Text>,
}

impl WrappedText {
    /// Break `source` so every line fits within `opts.max_width`.
    pub fn wrap(
        source: &Text,
        opts: WrapOpts,
        measure: &mut dyn TextMeasure,
    ) -> FrameloomResult<Self> {
        if !opts.max_width.is_finite() || !opts.line_gap.is_finite() {
            return Err(FrameloomError::validation(
                "wrap max_width and line_gap must be finite",
            ));
        }
        let cfg = source.config();
        let font = cfg.font.as_deref();
        let pieces = split_lines(&cfg.text, cfg.position.x, opts.max_width, |s| {
            measure.text_width(s, cfg.size, font)
        })?;
        let step = measure.line_height(cfg.size, font)? + opts.line_gap;

        let lines = pieces
            .into_iter()
            .enumerate()
            .map(|(i, piece)| {
                let at = Point::new(cfg.position.x, cfg.position.y + step * i as f64);
                source.with_text(piece).with_position(at)
            })
            .collect();
        Ok(Self {
            source: source.clone(),
            lines,
        })
    }

    /// The unwrapped text this was built from.
    pub fn source(&self) -> &Text {
        &self.source
    }

    /// Lines in top-to-bottom order.
    pub fn lines(&self) -> &[Text] {
        &self.lines
    }

    /// Concatenation of every line.
    pub fn text(&self) -> String {
        self.lines.iter().map(Text::text).collect()
    }
}

/// Split `text` into pieces that fit between `x` and `max_width` according to `width`.
///
/// Breaks prefer the last space before the estimated break point; a space at the break
/// stays at the end of its line. With no space available the break falls mid-word.
/// The pieces always concatenate back to `text`, and an empty `text` yields one empty
/// piece.
pub fn split_lines(
    text: &str,
    x: f64,
    max_width: f64,
    mut width: impl FnMut(&str) -> FrameloomResult<f64>,
) -> FrameloomResult<Vec<String>> {
    let chars: Vec<char> = text.chars().collect();
    let mut rest: &[char] = &chars;
    let mut out = Vec::new();

    while !rest.is_empty() {
        let whole: String = rest.iter().collect();
        let w = width(&whole)?;
        if x + w <= max_width || rest.len() == 1 {
            out.push(whole);
            break;
        }

        let len = rest.len();
        let ratio = if w > 0.0 {
            ((max_width - x) / w).max(0.0)
        } else {
            1.0
        };
        let mut est = ((ratio * len as f64).floor() as usize).clamp(1, len - 1);

        let wrap_at = loop {
            let at = (1..=est).rev().find(|&i| rest[i] == ' ').unwrap_or(est);
            if at <= 1 {
                break at;
            }
            let head: String = rest[..at].iter().collect();
            if x + width(&head)? <= max_width {
                break at;
            }
            est = at - 1;
        };

        let cut = if rest[wrap_at] == ' ' {
            wrap_at + 1
        } else {
            wrap_at
        };
        out.push(rest[..cut].iter().collect());
        rest = &rest[cut..];
    }

    if out.is_empty() {
        out.push(String::new());
    }
    Ok(out)
}

impl Render for WrappedText {
    /// Every line is shaped before any is painted, so a line that cannot be shaped
    /// leaves the canvas untouched.
    fn render_to(&self, canvas: &mut Canvas, ctx: &mut PaintCtx<'_>) -> FrameloomResult<()> {
        let shaped = self
            .lines
            .iter()
            .filter(|line| !line.config().text.is_empty())
            .map(|line| ctx.shape_text(line.config()))
            .collect::<FrameloomResult<Vec<_>>>()?;
        for line in &shaped {
            line.paint(canvas)?;
        }
        Ok(())
    }

    fn bounds(&self, ctx: &mut PaintCtx<'_>) -> FrameloomResult<Rect> {
        let mut out: Option<Rect> = None;
        for line in &self.lines {
            let r = line.bounds(ctx)?;
            out = Some(out.map_or(r, |acc| acc.union(r)));
        }
        Ok(out.unwrap_or_else(|| Rect::from_origin_size(self.source.position(), (0.0, 0.0))))
    }
}

impl Animatable for WrappedText {
    fn position(&self) -> Point {
        self.source.position()
    }

    fn offset(&self, by: Vec2) -> Self {
        Self {
            source: self.source.offset(by),
            lines: self.lines.iter().map(|l| l.offset(by)).collect(),
        }
    }

    fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            source: self.source.with_opacity(opacity),
            lines: self.lines.iter().map(|l| l.with_opacity(opacity)).collect(),
        }
    }
}

impl Reveal for WrappedText {
    fn char_len(&self) -> usize {
        self.lines.iter().map(Reveal::char_len).sum()
    }

    /// Lines up to and including the one the character budget runs out in.
    fn reveal(&self, chars: usize) -> Self {
        let mut left = chars;
        let mut lines = Vec::new();
        for line in &self.lines {
            if left == 0 {
                break;
            }
            let len = line.char_len();
            if left >= len {
                lines.push(line.clone());
                left -= len;
            } else {
                lines.push(line.reveal(left));
                left = 0;
            }
        }
        Self {
            source: self.source.clone(),
            lines,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/wrap.rs"]
mod tests;
