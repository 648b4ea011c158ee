//! Configuration schema: an arena of immutable models.
//!
//! A [`Schema`] owns every [`ConfigModel`]; properties that nest other
//! configurations refer to them by [`NodeId`] rather than embedding them.
//! Models must be added before anything that refers to them, so a schema
//! assembled through [`SchemaBuilder`] cannot refer forward.

use std::collections::BTreeMap;
use std::fmt;

use crate::{ConfigError, ConfigResult};

mod defaults;
mod model;
mod property;
mod value_type;

pub use defaults::{DefaultOverrides, DefaultValue};
pub use model::ConfigModel;
pub use property::{
    LIST_SIZE_SUFFIX, Property, PropertyInfo, SubConfigListProperty, SubConfigProperty,
    ValueProperty, list_size_name,
};
pub use value_type::ValueType;

/// Free-form attributes attached to models and properties.
///
/// Attributes are handed to the source with every lookup.
pub type Attributes = BTreeMap<String, String>;

/// Overlay `overrides` on `base`, with `overrides` winning on collisions.
#[must_use]
pub fn merge_attributes(base: &Attributes, overrides: &Attributes) -> Attributes {
    let mut merged = base.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Stable handle to a model inside a [`Schema`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only collection of configuration models.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    nodes: Vec<ConfigModel>,
}

impl Schema {
    /// Start assembling a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up a model by id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownNode`] when `id` belongs to another
    /// schema.
    pub fn node(&self, id: NodeId) -> ConfigResult<&ConfigModel> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| ConfigError::UnknownNode { id: id.0 }.shared())
    }

    /// Find the first model registered under `type_name`.
    #[must_use]
    pub fn find(&self, type_name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.type_name() == type_name)
            .map(NodeId)
    }

    /// Number of models.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when no model has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builder that accumulates models leaves-first.
///
/// # Examples
///
/// ```
/// use keyed_config::{ConfigModel, Schema, SubConfigProperty, ValueProperty, ValueType};
///
/// let mut builder = Schema::builder();
/// let db = builder.add(
///     ConfigModel::new("Database").property(ValueProperty::new("url", ValueType::String)),
/// );
/// let root = builder.add(
///     ConfigModel::new("App")
///         .prefix("app")
///         .property(SubConfigProperty::new("database", db).prefix("db")),
/// );
/// let schema = builder.build();
/// assert_eq!(schema.len(), 2);
/// assert!(schema.node(root).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    nodes: Vec<ConfigModel>,
}

impl SchemaBuilder {
    /// Register `model` and return its id.
    pub fn add(&mut self, model: ConfigModel) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(model);
        id
    }

    /// Finish the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema { nodes: self.nodes }
    }
}
