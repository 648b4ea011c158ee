//! Named decryption providers for secret values.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{ConfigError, ConfigResult};

/// Error type returned by decryption providers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Turns a stored (encrypted or obfuscated) value into plain text.
pub trait Decryptor: Send + Sync {
    /// Decrypt `raw`.
    ///
    /// # Errors
    ///
    /// Returns an error when `raw` cannot be decrypted.
    fn decrypt(&self, raw: &str) -> Result<String, BoxError>;
}

impl<F> Decryptor for F
where
    F: Fn(&str) -> Result<String, BoxError> + Send + Sync,
{
    fn decrypt(&self, raw: &str) -> Result<String, BoxError> {
        self(raw)
    }
}

/// Decryption providers keyed by the name properties refer to.
#[derive(Clone, Default)]
pub struct DecryptorRegistry {
    providers: BTreeMap<String, Arc<dyn Decryptor>>,
}

impl fmt::Debug for DecryptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.providers.keys()).finish()
    }
}

impl DecryptorRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` under `name`, replacing any previous provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Decryptor>) {
        self.providers.insert(name.into(), provider);
    }

    /// Whether a provider is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Decrypt `raw`, read from `key`, with the provider called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDecryptor`] when `name` is not
    /// registered and [`ConfigError::Decryption`] when the provider fails.
    pub fn decrypt(&self, name: &str, key: &str, raw: &str) -> ConfigResult<String> {
        let provider = self.providers.get(name).ok_or_else(|| {
            ConfigError::UnknownDecryptor {
                name: name.to_owned(),
            }
            .shared()
        })?;
        provider.decrypt(raw).map_err(|err| {
            ConfigError::Decryption {
                key: key.to_owned(),
                provider: name.to_owned(),
                message: err.to_string(),
            }
            .shared()
        })
    }
}
