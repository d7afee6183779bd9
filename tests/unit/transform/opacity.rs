use super::*;
use crate::drawable::{Circle, Formula, FormulaConfig};
use crate::foundation::core::Point;

fn alphas(cs: &[Circle]) -> Vec<u8> {
    cs.iter().map(|c| c.config().color.a).collect()
}

#[test]
fn fade_in_stops_one_step_short_of_final() {
    let c = Circle::at(Point::ORIGIN, 5.0);
    let frames = fade_in(&c, 4, 0.0, 1.0).unwrap();
    assert_eq!(alphas(&frames), vec![0, 63, 127, 191]);
}

#[test]
fn fade_out_stops_one_step_short_of_final() {
    let c = Circle::at(Point::ORIGIN, 5.0);
    let frames = fade_out(&c, 4, 1.0, 0.0).unwrap();
    assert_eq!(alphas(&frames), vec![255, 191, 127, 63]);
}

#[test]
fn fade_keeps_rgb_and_position() {
    let c = Circle::at(Point::new(7.0, 8.0), 5.0);
    for f in fade_in(&c, 3, 0.2, 0.8).unwrap() {
        assert_eq!(f.config().center, Point::new(7.0, 8.0));
        assert_eq!(f.config().color.with_alpha(255), c.config().color);
    }
}

#[test]
fn fade_on_formula_drives_alpha_field() {
    let f = Formula::new(FormulaConfig::default());
    let frames = fade_in(&f, 2, 0.0, 1.0).unwrap();
    let a: Vec<f32> = frames.iter().map(|f| f.config().alpha).collect();
    assert_eq!(a, vec![0.0, 0.5]);
}

#[test]
fn wrong_direction_is_a_precondition_failure() {
    let c = Circle::at(Point::ORIGIN, 5.0);
    assert!(matches!(
        fade_in(&c, 3, 1.0, 0.5),
        Err(FrameloomError::Precondition(_))
    ));
    assert!(matches!(
        fade_in(&c, 3, 0.5, 0.5),
        Err(FrameloomError::Precondition(_))
    ));
    assert!(matches!(
        fade_out(&c, 3, 0.0, 1.0),
        Err(FrameloomError::Precondition(_))
    ));
    assert!(fade_in(&c, 3, f64::NAN, 1.0).is_err());
}

#[test]
fn zero_frames_is_a_precondition_failure() {
    let c = Circle::at(Point::ORIGIN, 5.0);
    assert!(matches!(
        fade_in(&c, 0, 0.0, 1.0),
        Err(FrameloomError::Precondition(_))
    ));
    assert!(matches!(
        fade_out(&c, 0, 1.0, 0.0),
        Err(FrameloomError::Precondition(_))
    ));
}

#[test]
fn hold_repeats() {
    let c = Circle::at(Point::ORIGIN, 5.0);
    assert_eq!(hold(&c, 3), vec![c.clone(), c.clone(), c]);
}
