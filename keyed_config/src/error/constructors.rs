//! Constructors for `ConfigError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::ConfigError;

impl ConfigError {
    /// Construct an invalid-argument error.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_config::ConfigError;
    /// let e = ConfigError::invalid_argument("index must not be negative");
    /// assert!(matches!(e, ConfigError::InvalidArgument { .. }));
    /// ```
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Construct a conversion error naming the key, raw value and target type.
    #[must_use]
    pub fn conversion(
        key: impl Into<String>,
        value: impl Into<String>,
        target: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            key: key.into(),
            value: value.into(),
            target: target.to_string(),
            message: message.into(),
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_config::ConfigError;
    /// let fe = figment::Error::from("boom");
    /// let e = ConfigError::gathering(fe);
    /// assert!(matches!(e, ConfigError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Wrap the error in an [`Arc`] for use as a [`super::ConfigResult`] error.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
