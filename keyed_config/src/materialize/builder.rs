//! Builder for [`Materializer`].

use std::sync::Arc;

use super::{
    ConfigSource, ConverterRegistry, Decryptor, DecryptorRegistry, EngineSettings, Materializer,
    ResolutionMode, Schema, TypeConverter,
};

/// Collects collaborators and settings for a [`Materializer`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use keyed_config::{MapSource, Materializer, ResolutionMode, Schema};
///
/// let materializer = Materializer::builder(Arc::new(Schema::default()), Arc::new(MapSource::new()))
///     .mode(ResolutionMode::Dynamic)
///     .fallback_prefix("global")
///     .build();
/// assert_eq!(materializer.settings().mode, ResolutionMode::Dynamic);
/// ```
#[must_use]
pub struct MaterializerBuilder {
    schema: Arc<Schema>,
    source: Arc<dyn ConfigSource>,
    converters: ConverterRegistry,
    decryptors: DecryptorRegistry,
    settings: EngineSettings,
}

impl MaterializerBuilder {
    pub(super) fn new(schema: Arc<Schema>, source: Arc<dyn ConfigSource>) -> Self {
        Self {
            schema,
            source,
            converters: ConverterRegistry::new(),
            decryptors: DecryptorRegistry::new(),
            settings: EngineSettings::default(),
        }
    }

    /// Replace every setting.
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the resolution timing.
    pub const fn mode(mut self, mode: ResolutionMode) -> Self {
        self.settings.mode = mode;
        self
    }

    /// Set the fallback namespace tried after prefixed keys.
    pub fn fallback_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.fallback_prefix = Some(prefix.into());
        self
    }

    /// Register a converter that properties can name as an override.
    pub fn converter(mut self, name: impl Into<String>, converter: Arc<dyn TypeConverter>) -> Self {
        self.converters.register(name, converter);
        self
    }

    /// Add a converter consulted by type before the standard one.
    pub fn type_converter(mut self, converter: Arc<dyn TypeConverter>) -> Self {
        self.converters.push(converter);
        self
    }

    /// Register a decryption provider under `name`.
    pub fn decryptor(mut self, name: impl Into<String>, provider: Arc<dyn Decryptor>) -> Self {
        self.decryptors.register(name, provider);
        self
    }

    /// Finish the materializer.
    pub fn build(self) -> Materializer {
        Materializer::from_parts(
            self.schema,
            self.source,
            self.converters,
            self.decryptors,
            self.settings,
        )
    }
}
