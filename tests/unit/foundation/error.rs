use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FrameloomError::precondition("x")
            .to_string()
            .contains("precondition failed:")
    );
    assert!(
        FrameloomError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FrameloomError::external("x")
            .to_string()
            .contains("external tool failure:")
    );
    assert!(
        FrameloomError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn out_of_range_reports_index_and_total() {
    let msg = FrameloomError::out_of_range(7, 3).to_string();
    assert!(msg.contains('7'));
    assert!(msg.contains("[0, 3)"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FrameloomError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
