//! Configuration models: one node of the schema arena.

use super::{Attributes, Property};

/// Declarative description of one configuration type.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigModel {
    type_name: String,
    prefixes: Vec<String>,
    properties: Vec<Property>,
    attributes: Attributes,
    is_abstract: bool,
}

impl ConfigModel {
    /// Start a model for `type_name` with no prefixes or properties.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            prefixes: Vec::new(),
            properties: Vec::new(),
            attributes: Attributes::new(),
            is_abstract: false,
        }
    }

    /// Add a type-level prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Append a property; declaration order is preserved.
    #[must_use]
    pub fn property(mut self, property: impl Into<Property>) -> Self {
        self.properties.push(property.into());
        self
    }

    /// Attach a custom attribute.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Mark the model as a non-instantiable placeholder.
    #[must_use]
    pub const fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Name of the described type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Key segments contributed at this level.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Property called `name`, if declared.
    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Custom attributes declared on the type.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Whether the model is a non-instantiable placeholder.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }
}
