//! Value resolution: candidate lookup, decryption, conversion.
//!
//! A [`ValueResolution`] captures everything needed to resolve one value
//! property. Static materialization runs it once; dynamic materialization
//! keeps it and runs it on every read.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use crate::{
    Attributes, CandidateKeys, ConfigError, ConfigResult, ConfigSource, ConverterRegistry,
    DecryptorRegistry, ValueProperty, ValueType,
};

const REDACTED: &str = "<redacted>";

/// Collaborators a resolution runs against.
#[derive(Clone)]
pub struct ResolutionContext {
    source: Arc<dyn ConfigSource>,
    converters: ConverterRegistry,
    decryptors: DecryptorRegistry,
}

impl fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("converters", &self.converters)
            .field("decryptors", &self.decryptors)
            .finish_non_exhaustive()
    }
}

impl ResolutionContext {
    /// Bundle a source with its converters and decryption providers.
    #[must_use]
    pub fn new(
        source: Arc<dyn ConfigSource>,
        converters: ConverterRegistry,
        decryptors: DecryptorRegistry,
    ) -> Self {
        Self {
            source,
            converters,
            decryptors,
        }
    }

    /// Source values are read from.
    #[must_use]
    pub fn source(&self) -> &dyn ConfigSource {
        self.source.as_ref()
    }

    /// Registered converters.
    #[must_use]
    pub const fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }
}

/// Where a resolved raw value came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueOrigin {
    /// Read from the source at this key.
    Key(String),
    /// Taken from the effective default.
    Default,
}

/// Resolution strategy for one value property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueResolution {
    property: String,
    candidates: CandidateKeys,
    value_type: ValueType,
    converter: Option<String>,
    decryptor: Option<String>,
    default: Option<String>,
    required: bool,
    attributes: Attributes,
}

impl ValueResolution {
    /// Capture the resolution of `property` over `candidates`.
    ///
    /// `default` is the effective default after parent overrides and
    /// `attributes` the merged attributes handed to the source.
    #[must_use]
    pub fn new(
        property: &ValueProperty,
        candidates: CandidateKeys,
        default: Option<&str>,
        attributes: Attributes,
    ) -> Self {
        Self {
            property: property.info.name.clone(),
            candidates,
            value_type: property.value_type.clone(),
            converter: property.converter.clone(),
            decryptor: property.decryptor.clone(),
            default: default.map(str::to_owned),
            required: property.required,
            attributes,
        }
    }

    /// Name of the resolved property.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Candidate keys in lookup order.
    #[must_use]
    pub const fn candidates(&self) -> &CandidateKeys {
        &self.candidates
    }

    /// Declared value type.
    #[must_use]
    pub const fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// Whether raw values pass through a decryption provider.
    #[must_use]
    pub const fn is_encrypted(&self) -> bool {
        self.decryptor.is_some()
    }

    /// Effective default, before conversion.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Locate the raw value: the first present candidate, else the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] for a required property with
    /// neither.
    pub fn locate(
        &self,
        context: &ResolutionContext,
    ) -> ConfigResult<Option<(ValueOrigin, String)>> {
        let keys = self.candidates.as_slice();
        if let Some((key, raw)) = context.source().first_present(keys, &self.attributes) {
            trace!(property = %self.property, key, "resolved from source");
            return Ok(Some((ValueOrigin::Key(key.to_owned()), raw)));
        }
        if let Some(raw) = &self.default {
            trace!(property = %self.property, candidates = ?keys, "using default");
            return Ok(Some((ValueOrigin::Default, raw.clone())));
        }
        if self.required {
            return Err(ConfigError::MissingValue {
                property: self.property.clone(),
                candidates: keys.to_vec(),
            }
            .shared());
        }
        trace!(property = %self.property, candidates = ?keys, "no value");
        Ok(None)
    }

    /// Resolve to a typed value, or `None` when absent.
    ///
    /// Source values and defaults go through the same decryption and
    /// conversion; a default is never looked up again.
    ///
    /// # Errors
    ///
    /// Returns conversion, decryption and missing-value errors.
    pub fn resolve(&self, context: &ResolutionContext) -> ConfigResult<Option<Value>> {
        let Some((origin, raw)) = self.locate(context)? else {
            return Ok(None);
        };
        let key = match &origin {
            ValueOrigin::Key(key) => key.clone(),
            ValueOrigin::Default => format!("{} (default)", self.property),
        };
        let plain = match &self.decryptor {
            Some(name) => context.decryptors.decrypt(name, &key, &raw)?,
            None => raw,
        };
        let converted = context.converters.convert(
            &key,
            &plain,
            &self.value_type,
            self.converter.as_deref(),
        );
        match converted {
            Err(err) if self.decryptor.is_some() => Err(redact(&err)),
            other => other.map(Some),
        }
    }

    /// Render `value` back to a raw string with this property's converter.
    ///
    /// # Errors
    ///
    /// Returns a conversion error when the converter cannot render `value`.
    pub fn render(&self, context: &ResolutionContext, value: &Value) -> ConfigResult<String> {
        let key = self.candidates.primary().unwrap_or(&self.property);
        context
            .converters
            .render(key, value, &self.value_type, self.converter.as_deref())
    }
}

fn redact(err: &Arc<ConfigError>) -> Arc<ConfigError> {
    match err.as_ref() {
        ConfigError::Conversion {
            key,
            target,
            message,
            ..
        } => ConfigError::Conversion {
            key: key.clone(),
            value: REDACTED.to_owned(),
            target: target.clone(),
            message: message.clone(),
        }
        .shared(),
        _ => Arc::clone(err),
    }
}
