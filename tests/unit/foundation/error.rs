use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PaintreelError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        PaintreelError::empty_input("x")
            .to_string()
            .contains("nothing to export:")
    );
    assert!(
        PaintreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PaintreelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn io_error_names_the_offending_file() {
    let err = PaintreelError::io(
        "out/snapshot_000003.png",
        std::io::Error::other("disk full"),
    );
    let msg = err.to_string();
    assert!(msg.contains("snapshot_000003.png"));
    assert!(msg.contains("disk full"));
}

#[test]
fn only_configuration_errors_are_layer_local() {
    assert!(PaintreelError::configuration("bad origin").is_layer_local());
    assert!(!PaintreelError::empty_input("none").is_layer_local());
    assert!(!PaintreelError::validation("batch").is_layer_local());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PaintreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
