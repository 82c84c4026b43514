use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CakewalkError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CakewalkError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(CakewalkError::fill("x").to_string().contains("fill error:"));
    assert!(
        CakewalkError::color("x")
            .to_string()
            .contains("color error:")
    );
    assert!(CakewalkError::text("x").to_string().contains("text error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CakewalkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_context_converts_through_from() {
    fn fails() -> CakewalkResult<()> {
        Err(anyhow::anyhow!("backend unavailable").into())
    }
    assert!(matches!(fails().unwrap_err(), CakewalkError::Other(_)));
}
