//! Engine-wide settings.
//!
//! Settings can be built in code or extracted from any [`Figment`], which
//! lets applications load them alongside their own configuration layers.

use figment::{Figment, providers::Env};
use serde::{Deserialize, Serialize};

use crate::result_ext::GatheringResultExt;
use crate::{ConfigResult, KeyGenerator};

/// Prefix of the environment variables read by [`EngineSettings::from_env`].
pub const SETTINGS_ENV_PREFIX: &str = "KEYED_CONFIG_";

/// When value properties are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Resolve every value once, during materialization.
    #[default]
    Static,
    /// Keep the resolution and re-run it on every read.
    Dynamic,
}

/// Settings shared by every materialization of one engine.
///
/// # Examples
///
/// ```
/// use figment::{Figment, providers::Serialized};
/// use keyed_config::{EngineSettings, ResolutionMode};
///
/// let figment = Figment::from(Serialized::defaults(serde_json::json!({
///     "mode": "dynamic",
///     "fallback_prefix": "global",
/// })));
/// let settings = EngineSettings::from_figment(&figment).expect("settings extract");
/// assert_eq!(settings.mode, ResolutionMode::Dynamic);
/// assert_eq!(settings.fallback_prefix.as_deref(), Some("global"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Resolution timing.
    pub mode: ResolutionMode,
    /// Namespace tried for every property after its prefixed keys.
    pub fallback_prefix: Option<String>,
}

impl EngineSettings {
    /// Extract settings from `figment`; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Gathering`] when the data does not match
    /// the settings shape.
    pub fn from_figment(figment: &Figment) -> ConfigResult<Self> {
        figment.extract().into_gathering()
    }

    /// Read `KEYED_CONFIG_MODE` and `KEYED_CONFIG_FALLBACK_PREFIX`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Gathering`] when a variable holds an
    /// invalid value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_figment(&Figment::from(Env::prefixed(SETTINGS_ENV_PREFIX)))
    }

    /// Generator for the fallback namespace, if one is configured.
    #[must_use]
    pub fn fallback_generator(&self) -> Option<KeyGenerator> {
        self.fallback_prefix
            .as_deref()
            .filter(|prefix| !prefix.trim().is_empty())
            .map(|prefix| KeyGenerator::empty().append(&[prefix]))
    }
}
