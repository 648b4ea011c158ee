//! Built-in converter for the non-custom [`ValueType`]s.

use serde_json::{Number, Value};

use super::{ConversionFailure, TypeConverter};
use crate::ValueType;

/// Converter for strings, booleans, numbers and comma-separated lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardConverter;

fn parse_bool(raw: &str) -> Result<Value, ConversionFailure> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        other => Err(ConversionFailure::new(format!(
            "expected `true` or `false`, found `{other}`"
        ))),
    }
}

fn parse_float(raw: &str) -> Result<Value, ConversionFailure> {
    let parsed: f64 = raw.trim().parse().map_err(ConversionFailure::new)?;
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| ConversionFailure::new("non-finite floats are not supported"))
}

impl TypeConverter for StandardConverter {
    fn is_applicable(&self, value_type: &ValueType) -> bool {
        match value_type {
            ValueType::List(inner) => self.is_applicable(inner),
            ValueType::Custom(_) => false,
            _ => true,
        }
    }

    fn from_raw(&self, value_type: &ValueType, raw: &str) -> Result<Value, ConversionFailure> {
        match value_type {
            ValueType::String => Ok(Value::String(raw.to_owned())),
            ValueType::Bool => parse_bool(raw),
            ValueType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(ConversionFailure::new),
            ValueType::Unsigned => raw
                .trim()
                .parse::<u64>()
                .map(Value::from)
                .map_err(ConversionFailure::new),
            ValueType::Float => parse_float(raw),
            ValueType::List(inner) => {
                if raw.trim().is_empty() {
                    return Ok(Value::Array(Vec::new()));
                }
                raw.split(',')
                    .map(|item| self.from_raw(inner, item.trim()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            ValueType::Custom(name) => Err(ConversionFailure::new(format!(
                "custom type `{name}` needs a registered converter"
            ))),
        }
    }

    fn to_raw(&self, value_type: &ValueType, value: &Value) -> Result<String, ConversionFailure> {
        match (value_type, value) {
            (ValueType::String, Value::String(text)) => Ok(text.clone()),
            (ValueType::Bool, Value::Bool(flag)) => Ok(flag.to_string()),
            (ValueType::Integer | ValueType::Unsigned | ValueType::Float, Value::Number(n)) => {
                Ok(n.to_string())
            }
            (ValueType::List(inner), Value::Array(items)) => items
                .iter()
                .map(|item| self.to_raw(inner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(|parts| parts.join(",")),
            (expected, found) => Err(ConversionFailure::new(format!(
                "cannot render {found} as {expected}"
            ))),
        }
    }
}
