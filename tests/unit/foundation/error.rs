use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MockError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MockError::structural("x")
            .to_string()
            .contains("structural error:")
    );
    assert!(MockError::marshal("x").to_string().contains("marshal error:"));
    assert!(
        MockError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn decode_error_reports_offset() {
    let err = MockError::decode(17, "selector 9 out of range");
    assert_eq!(
        err.to_string(),
        "decode error at byte 17: selector 9 out of range"
    );
    assert!(err.is_decode());
    assert!(!err.is_structural());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MockError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = MockError::from(bad);
    assert!(matches!(err, MockError::Serde(_)));
}
