use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AquarelleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(AquarelleError::load("x").to_string().contains("load error:"));
    assert!(
        AquarelleError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AquarelleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
