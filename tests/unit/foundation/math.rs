use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn opacity_to_u8_clamps() {
    assert_eq!(opacity_to_u8(-1.0), 0);
    assert_eq!(opacity_to_u8(0.5), 128);
    assert_eq!(opacity_to_u8(3.0), 255);
}
