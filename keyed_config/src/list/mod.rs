//! Lists of nested configurations.
//!
//! A [`SubConfigurationList`] eagerly builds its default-sized items when
//! created. Later reads may ask for fewer or more items: fewer yields a view
//! over the built items, more yields a fresh list whose tail is built on
//! demand and never stored back.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::{
    Attributes, ConfigError, ConfigInstance, ConfigResult, DefaultOverrides, KeyGenerator, NodeId,
    SubConfigListProperty,
};

/// Capability to build one list item.
///
/// The materializer implements this so lists can build further items after
/// the instance that owns them has been returned.
pub trait CreateItem: Send + Sync {
    /// Build an instance of `node` under `key_generator`.
    ///
    /// # Errors
    ///
    /// Returns any error raised while materializing the item.
    fn create_item(
        &self,
        node: NodeId,
        key_generator: &KeyGenerator,
        defaults: &DefaultOverrides,
        attributes: &Attributes,
    ) -> ConfigResult<ConfigInstance>;
}

/// List container owned by one materialized instance.
#[derive(Clone)]
pub struct SubConfigurationList {
    property: SubConfigListProperty,
    key_generator: KeyGenerator,
    attributes: Attributes,
    items: Vec<Arc<ConfigInstance>>,
    factory: Arc<dyn CreateItem>,
}

impl fmt::Debug for SubConfigurationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubConfigurationList")
            .field("list", &self.property.info.name)
            .field("item_node", &self.property.node)
            .field("key_generator", &self.key_generator)
            .field("default_size", &self.property.default_size)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl SubConfigurationList {
    /// Create the list for `property` and build its default-sized items.
    ///
    /// `key_generator` already includes the enclosing prefixes and the
    /// property's own prefixes; items index into it.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building an item.
    pub fn build(
        factory: Arc<dyn CreateItem>,
        property: &SubConfigListProperty,
        key_generator: KeyGenerator,
        attributes: Attributes,
    ) -> ConfigResult<Self> {
        let mut list = Self {
            property: property.clone(),
            key_generator,
            attributes,
            items: Vec::with_capacity(property.default_size),
            factory,
        };
        for index in 0..property.default_size {
            let item = list.create(index)?;
            list.items.push(item);
        }
        Ok(list)
    }

    fn create(&self, index: usize) -> ConfigResult<Arc<ConfigInstance>> {
        let empty = DefaultOverrides::new();
        let defaults = self.property.defaults_for(index).unwrap_or(&empty);
        let generator = self.key_generator.append_index(index);
        self.factory
            .create_item(self.property.node, &generator, defaults, &self.attributes)
            .map(Arc::new)
    }

    /// Number of eagerly built items.
    #[must_use]
    pub const fn default_size(&self) -> usize {
        self.property.default_size
    }

    /// Eagerly built items.
    #[must_use]
    pub fn items(&self) -> &[Arc<ConfigInstance>] {
        &self.items
    }

    /// Generator items are indexed from.
    #[must_use]
    pub const fn key_generator(&self) -> &KeyGenerator {
        &self.key_generator
    }

    /// Read-only list of `required_size` items.
    ///
    /// Built items are returned as-is, so repeated calls share them. Items
    /// beyond the built ones are created for this call only; two calls that
    /// both extend the list return distinct tail items.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building a tail item, and
    /// [`crate::ConfigError::InvalidArgument`] when `required_size` items
    /// cannot be allocated.
    pub fn as_unmodifiable_list(
        &self,
        required_size: usize,
    ) -> ConfigResult<Cow<'_, [Arc<ConfigInstance>]>> {
        if let Some(view) = self.items.get(..required_size) {
            return Ok(Cow::Borrowed(view));
        }
        debug!(
            built = self.items.len(),
            required = required_size,
            "extending list beyond built items"
        );
        let mut extended = Vec::new();
        extended.try_reserve(required_size).map_err(|err| {
            ConfigError::invalid_argument(format!(
                "cannot hold {required_size} items in list '{}': {err}",
                self.property.info.name
            ))
            .shared()
        })?;
        extended.extend(self.items.iter().cloned());
        for index in self.items.len()..required_size {
            extended.push(self.create(index)?);
        }
        Ok(Cow::Owned(extended))
    }
}
