//! Primary error enum for materialization flows.

use figment::Error as FigmentError;
use thiserror::Error;

/// Errors that can occur while materializing configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A negative index or size, or another out-of-range argument.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable explanation of the rejected argument.
        message: String,
    },

    /// Attempted to materialize a non-instantiable configuration model.
    #[error("cannot materialize abstract configuration type '{type_name}'")]
    AbstractNode {
        /// Type name of the abstract model.
        type_name: String,
    },

    /// A property referenced a node that is not part of the schema.
    #[error("schema has no configuration model with id {id}")]
    UnknownNode {
        /// Raw arena index that failed to resolve.
        id: usize,
    },

    /// A source value or default could not be converted to its declared type.
    #[error("cannot convert '{value}' at '{key}' to {target}: {message}")]
    Conversion {
        /// Key the raw value was read from, or a default marker.
        key: String,
        /// Raw string that failed to convert.
        value: String,
        /// Declared target type.
        target: String,
        /// Converter-provided reason.
        message: String,
    },

    /// A required property had neither a source value nor a default.
    #[error("no value for required property '{property}' (tried: {})", candidates.join(", "))]
    MissingValue {
        /// Name of the unresolved property.
        property: String,
        /// Candidate keys that were consulted, in order.
        candidates: Vec<String>,
    },

    /// No registered converter accepts the declared type.
    #[error("no converter registered for type {target}")]
    NoConverter {
        /// Declared target type.
        target: String,
    },

    /// A property named a converter override that is not registered.
    #[error("unknown converter '{name}'")]
    UnknownConverter {
        /// Converter name declared on the property.
        name: String,
    },

    /// A property named a decryption provider that is not registered.
    #[error("unknown decryption provider '{name}'")]
    UnknownDecryptor {
        /// Provider name declared on the property.
        name: String,
    },

    /// A decryption provider rejected a value.
    #[error("decryption provider '{provider}' failed for '{key}': {message}")]
    Decryption {
        /// Key the encrypted value was read from, or a default marker.
        key: String,
        /// Name of the failing provider.
        provider: String,
        /// Provider-supplied reason.
        message: String,
    },

    /// Error while gathering values from a figment-backed source.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// A materialized instance could not be bound to a Rust type.
    #[error("Failed to deserialize materialized configuration: {0}")]
    Deserialize(#[from] serde_json::Error),
}
