//! Unit tests for error construction and rendering.

use rstest::rstest;

use super::ConfigError;

#[rstest]
fn conversion_error_names_key_value_and_target() {
    let err = ConfigError::conversion("db.port", "eighty", "integer", "invalid digit");
    let rendered = err.to_string();
    assert!(rendered.contains("db.port"), "missing key: {rendered}");
    assert!(rendered.contains("eighty"), "missing value: {rendered}");
    assert!(rendered.contains("integer"), "missing target: {rendered}");
}

#[rstest]
fn missing_value_lists_candidates_in_order() {
    let err = ConfigError::MissingValue {
        property: "url".into(),
        candidates: vec!["root.url".into(), "global.url".into()],
    };
    assert_eq!(
        err.to_string(),
        "no value for required property 'url' (tried: root.url, global.url)"
    );
}

#[rstest]
#[case(ConfigError::invalid_argument("negative size"), "invalid argument: negative size")]
#[case(
    ConfigError::AbstractNode { type_name: "Base".into() },
    "cannot materialize abstract configuration type 'Base'"
)]
#[case(ConfigError::UnknownNode { id: 7 }, "schema has no configuration model with id 7")]
fn renders_structural_errors(#[case] err: ConfigError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn shared_wraps_in_arc() {
    let err = ConfigError::gathering(figment::Error::from("boom")).shared();
    assert!(matches!(&*err, ConfigError::Gathering(_)));
}
