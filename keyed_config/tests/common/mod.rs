//! Shared test fixtures for integration tests.
//!
//! Schemas here mirror the shapes used across several test files so the
//! key layouts they exercise stay in one place.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use keyed_config::{
    Attributes, ConfigModel, ConfigSource, DefaultOverrides, DefaultValue, MapSource,
    Materializer, MaterializerBuilder, NodeId, Schema, SubConfigListProperty, SubConfigProperty,
    ValueProperty, ValueType,
};

/// Build a materializer over `schema` and an in-memory source.
pub fn materializer_for<const N: usize>(
    schema: Schema,
    entries: [(&str, &str); N],
) -> MaterializerBuilder {
    let source: MapSource = entries.into_iter().collect();
    Materializer::builder(Arc::new(schema), Arc::new(source))
}

/// `root` model with a `connection` sub-configuration holding `url` and
/// `timeout`.
pub fn connection_schema() -> (Schema, NodeId) {
    let mut builder = Schema::builder();
    let connection = builder.add(
        ConfigModel::new("Connection")
            .property(ValueProperty::new("url", ValueType::String))
            .property(ValueProperty::new("timeout", ValueType::Unsigned).default_value("30")),
    );
    let root = builder.add(
        ConfigModel::new("Root")
            .prefix("root")
            .property(SubConfigProperty::new("connection", connection).prefix("connection")),
    );
    (builder.build(), root)
}

/// `Item { x: Integer = 7 }` listed under `withPrefix` with `size` items and
/// the given per-index defaults.
pub fn list_schema(size: usize, per_index: Vec<DefaultOverrides>) -> (Schema, NodeId) {
    let mut builder = Schema::builder();
    let item = builder.add(
        ConfigModel::new("Item")
            .property(ValueProperty::new("x", ValueType::Integer).default_value("7")),
    );
    let list = per_index.into_iter().fold(
        SubConfigListProperty::new("items", item)
            .prefix("withPrefix")
            .default_size(size),
        SubConfigListProperty::item_defaults,
    );
    let root = builder.add(ConfigModel::new("Holder").property(list));
    (builder.build(), root)
}

/// Single-entry default override map.
pub fn overrides(property: &str, value: &str) -> DefaultOverrides {
    [(property.to_owned(), DefaultValue::from_declared(value))].into()
}

/// Source whose contents can change between reads.
#[derive(Debug, Default)]
pub struct SharedSource {
    inner: RwLock<MapSource>,
}

impl SharedSource {
    /// Store `value` at `key`.
    pub fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    /// Remove `key`.
    pub fn clear(&self, key: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(key);
        }
    }
}

impl ConfigSource for SharedSource {
    fn get_value(&self, key: &str, attributes: &Attributes) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|map| map.get_value(key, attributes))
    }
}

/// Source that answers nothing and counts the lookups made against it.
#[derive(Debug, Default)]
pub struct CountingSource {
    lookups: AtomicUsize,
}

impl CountingSource {
    /// Number of `get_value` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ConfigSource for CountingSource {
    fn get_value(&self, _key: &str, _attributes: &Attributes) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        None
    }
}
