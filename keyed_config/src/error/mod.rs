//! Error types produced while binding configuration.

mod constructors;
mod types;

pub use types::ConfigError;

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`std::sync::Arc`] so failures raised by a
/// deferred resolution can be handed to every reader without cloning the
/// underlying error.
pub type ConfigResult<T> = Result<T, std::sync::Arc<ConfigError>>;

#[cfg(test)]
mod tests;
