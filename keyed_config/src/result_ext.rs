//! Adapters from foreign error types into [`ConfigResult`].
//!
//! Two kinds of foreign error reach the crate's public API:
//!
//! - `serde_json::Error`, raised when an instance is bound to a caller's
//!   type through [`crate::ConfigInstance::get`] or
//!   [`crate::ConfigInstance::deserialize`]. [`ConfigResultExt::into_config`]
//!   routes it to [`ConfigError::Deserialize`].
//! - `figment::Error`, raised while [`crate::FigmentSource`] or
//!   [`crate::EngineSettings`] extract data from a figment.
//!   [`GatheringResultExt::into_gathering`] routes it to
//!   [`ConfigError::Gathering`].
//!
//! # Examples
//!
//! ```
//! use keyed_config::{ConfigError, ConfigResult, ConfigResultExt};
//!
//! let parsed: ConfigResult<u16> =
//!     serde_json::from_value(serde_json::json!("not a port")).into_config();
//! let err = parsed.expect_err("a string is not a port");
//! assert!(matches!(*err, ConfigError::Deserialize(_)));
//! ```

use std::sync::Arc;

use crate::{ConfigError, ConfigResult};

/// Maps `Result<T, E>` into [`ConfigResult`] for any `E` that converts into
/// a [`ConfigError`].
pub trait ConfigResultExt<T, E> {
    /// Convert the error side and share it.
    ///
    /// # Errors
    ///
    /// Returns the converted error when `self` is `Err`.
    fn into_config(self) -> ConfigResult<T>;
}

impl<T, E> ConfigResultExt<T, E> for Result<T, E>
where
    E: Into<ConfigError>,
{
    fn into_config(self) -> ConfigResult<T> {
        self.map_err(|err| Arc::new(err.into()))
    }
}

/// Maps figment extraction failures into [`ConfigError::Gathering`].
pub trait GatheringResultExt<T> {
    /// Wrap a figment failure as a gathering error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Gathering`] when `self` is `Err`.
    fn into_gathering(self) -> ConfigResult<T>;
}

impl<T> GatheringResultExt<T> for Result<T, figment::Error> {
    fn into_gathering(self) -> ConfigResult<T> {
        self.map_err(|err| ConfigError::gathering(err).shared())
    }
}
