//! Unit tests for the converter registry and the standard converter.

use std::sync::Arc;

use anyhow::{Result, ensure};
use rstest::rstest;
use serde_json::{Value, json};

use super::{ConversionFailure, ConverterRegistry, StandardConverter, TypeConverter};
use crate::{ConfigError, ValueType};

struct UpperCase;

impl TypeConverter for UpperCase {
    fn is_applicable(&self, value_type: &ValueType) -> bool {
        matches!(value_type, ValueType::Custom(name) if name == "upper")
    }

    fn from_raw(&self, _: &ValueType, raw: &str) -> Result<Value, ConversionFailure> {
        Ok(Value::String(raw.to_uppercase()))
    }

    fn to_raw(&self, _: &ValueType, value: &Value) -> Result<String, ConversionFailure> {
        value
            .as_str()
            .map(str::to_lowercase)
            .ok_or_else(|| ConversionFailure::new("not a string"))
    }
}

#[rstest]
#[case(ValueType::String, " padded ", json!(" padded "))]
#[case(ValueType::Bool, "TRUE", json!(true))]
#[case(ValueType::Integer, "-42", json!(-42))]
#[case(ValueType::Unsigned, " 7 ", json!(7))]
#[case(ValueType::Float, "1.5", json!(1.5))]
#[case(ValueType::list_of(ValueType::Integer), "1, 2,3", json!([1, 2, 3]))]
#[case(ValueType::list_of(ValueType::String), "", json!([]))]
fn standard_converter_parses(
    #[case] value_type: ValueType,
    #[case] raw: &str,
    #[case] expected: Value,
) -> Result<()> {
    let parsed = StandardConverter.from_raw(&value_type, raw)?;
    ensure!(parsed == expected, "expected {expected}, got {parsed}");
    Ok(())
}

#[rstest]
#[case(ValueType::Bool, "yes")]
#[case(ValueType::Integer, "4.2")]
#[case(ValueType::Unsigned, "-1")]
#[case(ValueType::Float, "NaN")]
#[case(ValueType::list_of(ValueType::Bool), "true,maybe")]
fn standard_converter_rejects(#[case] value_type: ValueType, #[case] raw: &str) {
    assert!(StandardConverter.from_raw(&value_type, raw).is_err());
}

#[rstest]
fn standard_converter_renders_lists() -> Result<()> {
    let rendered =
        StandardConverter.to_raw(&ValueType::list_of(ValueType::Integer), &json!([1, 2]))?;
    ensure!(rendered == "1,2", "unexpected rendering {rendered}");
    Ok(())
}

#[rstest]
fn conversion_error_reports_key_value_and_type() {
    let registry = ConverterRegistry::new();
    let err = registry
        .convert("server.port", "http", &ValueType::Unsigned, None)
        .err();
    assert!(matches!(
        err.as_deref(),
        Some(ConfigError::Conversion { key, value, target, .. })
            if key == "server.port" && value == "http" && target == "unsigned integer"
    ));
}

#[rstest]
fn custom_types_need_a_registered_converter() -> Result<()> {
    let custom = ValueType::Custom("upper".into());
    let mut registry = ConverterRegistry::new();
    ensure!(
        matches!(
            registry.convert("k", "v", &custom, None).err().as_deref(),
            Some(ConfigError::NoConverter { .. })
        ),
        "expected NoConverter before registration"
    );
    registry.push(Arc::new(UpperCase));
    ensure!(registry.convert("k", "v", &custom, None)? == json!("V"));
    Ok(())
}

#[rstest]
fn named_override_takes_precedence_over_type_lookup() -> Result<()> {
    let mut registry = ConverterRegistry::new();
    registry.register("shout", Arc::new(UpperCase));
    let value = registry.convert("k", "quiet", &ValueType::String, Some("shout"))?;
    ensure!(value == json!("QUIET"));
    let rendered = registry.render("k", &value, &ValueType::String, Some("shout"))?;
    ensure!(rendered == "quiet");
    Ok(())
}

#[rstest]
fn unknown_override_is_reported() {
    let registry = ConverterRegistry::new();
    let err = registry.convert("k", "v", &ValueType::String, Some("missing")).err();
    assert!(matches!(
        err.as_deref(),
        Some(ConfigError::UnknownConverter { name }) if name == "missing"
    ));
}
