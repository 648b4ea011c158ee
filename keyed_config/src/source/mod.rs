//! Flat key/value stores that values are resolved from.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::Attributes;

mod flatten;

pub use flatten::FigmentSource;

/// Flat string key/value store consulted during resolution.
///
/// Implementations must answer deterministically for the duration of one
/// materialization.
pub trait ConfigSource: Send + Sync {
    /// Raw value stored at `key`, if present.
    fn get_value(&self, key: &str, attributes: &Attributes) -> Option<String>;

    /// First present value among `candidates`, with the key that held it.
    fn first_present<'k>(
        &self,
        candidates: &'k [String],
        attributes: &Attributes,
    ) -> Option<(&'k str, String)> {
        candidates.iter().find_map(|key| {
            self.get_value(key, attributes)
                .map(|value| (key.as_str(), value))
        })
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn get_value(&self, key: &str, attributes: &Attributes) -> Option<String> {
        (**self).get_value(key, attributes)
    }
}

/// In-memory source backed by a sorted map.
///
/// # Examples
///
/// ```
/// use keyed_config::{Attributes, ConfigSource, MapSource};
///
/// let source: MapSource = [("app.port", "8080")].into_iter().collect();
/// assert_eq!(
///     source.get_value("app.port", &Attributes::new()).as_deref(),
///     Some("8080")
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapSource {
    values: BTreeMap<String, String>,
}

impl MapSource {
    /// Empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl ConfigSource for MapSource {
    fn get_value(&self, key: &str, _attributes: &Attributes) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for MapSource {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

/// Ordered stack of sources; earlier layers shadow later ones per key.
#[derive(Clone, Default)]
pub struct LayeredSource {
    layers: Vec<Arc<dyn ConfigSource>>,
}

impl std::fmt::Debug for LayeredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSource")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl LayeredSource {
    /// Empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower priority than every existing one.
    #[must_use]
    pub fn with(mut self, layer: impl ConfigSource + 'static) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    /// Append a shared layer.
    pub fn push(&mut self, layer: Arc<dyn ConfigSource>) {
        self.layers.push(layer);
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` when no layer was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl ConfigSource for LayeredSource {
    fn get_value(&self, key: &str, attributes: &Attributes) -> Option<String> {
        self.layers
            .iter()
            .find_map(|layer| layer.get_value(key, attributes))
    }
}
