use super::*;
use crate::drawable::{Circle, Drawable, Text, TextConfig};
use crate::foundation::core::Point;

fn text(s: &str) -> Text {
    Text::new(TextConfig {
        text: s.into(),
        ..TextConfig::default()
    })
}

#[test]
fn counts_round_down_when_more_chars_than_frames() {
    assert_eq!(revealed_counts(10, 4), vec![2, 5, 7, 10]);
}

#[test]
fn counts_round_up_when_fewer_chars_than_frames() {
    assert_eq!(revealed_counts(3, 5), vec![1, 2, 2, 3, 3]);
}

#[test]
fn counts_are_identity_at_one_char_per_frame() {
    assert_eq!(revealed_counts(4, 4), vec![1, 2, 3, 4]);
}

#[test]
fn counts_end_at_full_length() {
    for len in 1..40 {
        for frames in 1..40 {
            let c = revealed_counts(len, frames);
            assert_eq!(c.len(), frames);
            assert_eq!(*c.last().unwrap(), len, "len={len} frames={frames}");
            assert!(c.windows(2).all(|w| w[0] <= w[1]));
        }
    }
    assert!(revealed_counts(5, 0).is_empty());
}

#[test]
fn roll_reveals_prefixes() {
    let frames = roll(&text("hello"), 5);
    let texts: Vec<&str> = frames.iter().map(Text::text).collect();
    assert_eq!(texts, vec!["h", "he", "hel", "hell", "hello"]);
}

#[test]
fn roll_counts_characters_not_bytes() {
    let frames = roll(&text("héé"), 3);
    assert_eq!(frames[1].text(), "hé");
}

#[test]
fn roll_on_empty_text_returns_copies() {
    let t = text("");
    assert_eq!(roll(&t, 3), vec![t.clone(), t.clone(), t]);
}

#[test]
fn roll_on_circle_returns_copies() {
    let c: Drawable = Circle::at(Point::ORIGIN, 1.0).into();
    assert_eq!(roll(&c, 2), vec![c.clone(), c]);
}
