use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlitscanError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        SlitscanError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        SlitscanError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(SlitscanError::asset("x").to_string().contains("asset error:"));
    assert!(
        SlitscanError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlitscanError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
