//! String to typed-value conversion.
//!
//! Typed values are [`serde_json::Value`]s so a materialized instance can be
//! rendered as JSON and bound to ordinary serde types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::{ConfigError, ConfigResult, ValueType};

mod standard;

pub use standard::StandardConverter;

/// Reason a converter rejected its input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ConversionFailure(pub String);

impl ConversionFailure {
    /// Build a failure from any displayable reason.
    #[must_use]
    pub fn new(reason: impl fmt::Display) -> Self {
        Self(reason.to_string())
    }
}

/// Stateless conversion between raw strings and typed values.
pub trait TypeConverter: Send + Sync {
    /// Whether this converter handles `value_type`.
    fn is_applicable(&self, value_type: &ValueType) -> bool;

    /// Parse `raw` as `value_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionFailure`] when `raw` is not a valid
    /// `value_type`.
    fn from_raw(&self, value_type: &ValueType, raw: &str) -> Result<Value, ConversionFailure>;

    /// Render `value` back into its raw form.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionFailure`] when `value` does not match
    /// `value_type`.
    fn to_raw(&self, value_type: &ValueType, value: &Value) -> Result<String, ConversionFailure>;
}

/// Named converters plus an ordered applicability chain.
///
/// Converters pushed with [`ConverterRegistry::push`] are consulted before
/// the built-in [`StandardConverter`].
#[derive(Clone)]
pub struct ConverterRegistry {
    named: BTreeMap<String, Arc<dyn TypeConverter>>,
    chain: Vec<Arc<dyn TypeConverter>>,
    standard: StandardConverter,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("named", &self.named.keys().collect::<Vec<_>>())
            .field("chain", &self.chain.len())
            .finish_non_exhaustive()
    }
}

impl ConverterRegistry {
    /// Registry containing only the standard converter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            named: BTreeMap::new(),
            chain: Vec::new(),
            standard: StandardConverter,
        }
    }

    /// Register a converter that properties can name as an override.
    pub fn register(&mut self, name: impl Into<String>, converter: Arc<dyn TypeConverter>) {
        self.named.insert(name.into(), converter);
    }

    /// Add a converter to the applicability chain.
    pub fn push(&mut self, converter: Arc<dyn TypeConverter>) {
        self.chain.push(converter);
    }

    /// Pick the converter for `value_type`, honouring an override name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownConverter`] for an unregistered override
    /// and [`ConfigError::NoConverter`] when nothing accepts the type.
    pub fn select(
        &self,
        value_type: &ValueType,
        override_name: Option<&str>,
    ) -> ConfigResult<&dyn TypeConverter> {
        if let Some(name) = override_name {
            return self.named.get(name).map(AsRef::as_ref).ok_or_else(|| {
                ConfigError::UnknownConverter {
                    name: name.to_owned(),
                }
                .shared()
            });
        }
        self.chain
            .iter()
            .map(AsRef::as_ref)
            .find(|converter| converter.is_applicable(value_type))
            .or_else(|| {
                let standard: &dyn TypeConverter = &self.standard;
                standard.is_applicable(value_type).then_some(standard)
            })
            .ok_or_else(|| {
                ConfigError::NoConverter {
                    target: value_type.to_string(),
                }
                .shared()
            })
    }

    /// Convert `raw`, read from `key`, into `value_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Conversion`] naming `key`, `raw` and the target
    /// type, or a converter-selection error.
    pub fn convert(
        &self,
        key: &str,
        raw: &str,
        value_type: &ValueType,
        override_name: Option<&str>,
    ) -> ConfigResult<Value> {
        self.select(value_type, override_name)?
            .from_raw(value_type, raw)
            .map_err(|failure| ConfigError::conversion(key, raw, value_type, failure.0).shared())
    }

    /// Render `value` as a raw string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Conversion`] when the converter cannot render
    /// `value`, or a converter-selection error.
    pub fn render(
        &self,
        key: &str,
        value: &Value,
        value_type: &ValueType,
        override_name: Option<&str>,
    ) -> ConfigResult<String> {
        self.select(value_type, override_name)?
            .to_raw(value_type, value)
            .map_err(|failure| {
                ConfigError::conversion(key, value.to_string(), value_type, failure.0).shared()
            })
    }
}

#[cfg(test)]
mod tests;
