//! Materialized configuration instances.
//!
//! [`ConfigInstance`] is the backing storage the materializer writes into
//! through the [`PropertyAccessor`] contract. Readers get typed values,
//! nested instances and list views, or render the whole graph as JSON.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::result_ext::ConfigResultExt;
use crate::{ConfigError, ConfigResult, SubConfigurationList, list_size_name};

mod value;

pub use value::PropertyValue;

/// Storage contract between the materializer and an instance representation.
pub trait PropertyAccessor {
    /// Store the value property `name`.
    fn set_value(&mut self, name: &str, value: PropertyValue);
    /// Stored value property `name`.
    fn get_value(&self, name: &str) -> Option<&PropertyValue>;
    /// Store the nested configuration `name`.
    fn set_sub(&mut self, name: &str, sub: ConfigInstance);
    /// Stored nested configuration `name`.
    fn get_sub(&self, name: &str) -> Option<&ConfigInstance>;
    /// Store the list container `name`.
    fn set_sub_list(&mut self, name: &str, list: SubConfigurationList);
    /// Stored list container `name`.
    fn get_sub_list(&self, name: &str) -> Option<&SubConfigurationList>;
}

/// Convert a resolved, signed size into a list length.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidArgument`] for negative sizes.
pub fn checked_size(size: i64) -> ConfigResult<usize> {
    usize::try_from(size).map_err(|_| {
        ConfigError::invalid_argument(format!("list size must not be negative, got {size}"))
            .shared()
    })
}

/// A materialized configuration object.
#[derive(Clone, Debug, Default)]
pub struct ConfigInstance {
    type_name: String,
    values: BTreeMap<String, PropertyValue>,
    subs: BTreeMap<String, ConfigInstance>,
    lists: BTreeMap<String, SubConfigurationList>,
}

impl PropertyAccessor for ConfigInstance {
    fn set_value(&mut self, name: &str, value: PropertyValue) {
        self.values.insert(name.to_owned(), value);
    }

    fn get_value(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    fn set_sub(&mut self, name: &str, sub: ConfigInstance) {
        self.subs.insert(name.to_owned(), sub);
    }

    fn get_sub(&self, name: &str) -> Option<&ConfigInstance> {
        self.subs.get(name)
    }

    fn set_sub_list(&mut self, name: &str, list: SubConfigurationList) {
        self.lists.insert(name.to_owned(), list);
    }

    fn get_sub_list(&self, name: &str) -> Option<&SubConfigurationList> {
        self.lists.get(name)
    }
}

impl ConfigInstance {
    /// Empty instance of `type_name`.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Name of the materialized type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Typed value of the property `name`; `None` when absent or undeclared.
    ///
    /// # Errors
    ///
    /// Dynamic instances report resolution errors here.
    pub fn value(&self, name: &str) -> ConfigResult<Option<Value>> {
        self.values
            .get(name)
            .map_or(Ok(None), PropertyValue::get)
    }

    /// Value of the property `name` deserialized into `T`.
    ///
    /// # Errors
    ///
    /// Returns resolution errors and [`ConfigError::Deserialize`] when the
    /// value does not fit `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> ConfigResult<Option<T>> {
        self.value(name)?
            .map(|value| serde_json::from_value(value).into_config())
            .transpose()
    }

    /// Candidate keys consulted for the property `name`.
    #[must_use]
    pub fn candidate_keys(&self, name: &str) -> Option<&[String]> {
        self.values
            .get(name)
            .map(|value| value.resolution().candidates().as_slice())
    }

    /// Nested configuration `name`.
    #[must_use]
    pub fn sub(&self, name: &str) -> Option<&Self> {
        self.subs.get(name)
    }

    /// Resolved size of the list `name`.
    ///
    /// # Errors
    ///
    /// Returns resolution errors and [`ConfigError::InvalidArgument`] for a
    /// negative size.
    pub fn list_size(&self, name: &str) -> ConfigResult<Option<usize>> {
        let Some(list) = self.lists.get(name) else {
            return Ok(None);
        };
        match self.get::<i64>(&list_size_name(name))? {
            Some(size) => checked_size(size).map(Some),
            None => Ok(Some(list.default_size())),
        }
    }

    /// Items of the list `name`, at its resolved size.
    ///
    /// # Errors
    ///
    /// Returns size-resolution errors and errors raised while building items
    /// beyond the eagerly built ones.
    pub fn list(&self, name: &str) -> ConfigResult<Option<Cow<'_, [Arc<Self>]>>> {
        let (Some(list), Some(size)) = (self.lists.get(name), self.list_size(name)?) else {
            return Ok(None);
        };
        list.as_unmodifiable_list(size).map(Some)
    }

    /// Render the instance graph as JSON.
    ///
    /// Absent values become `null`; lists appear at their resolved size.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or list-construction error.
    pub fn to_json(&self) -> ConfigResult<Value> {
        let size_names: BTreeSet<String> = self.lists.keys().map(|n| list_size_name(n)).collect();
        let mut map = Map::new();
        for (name, value) in &self.values {
            if size_names.contains(name) {
                continue;
            }
            map.insert(name.clone(), value.get()?.unwrap_or(Value::Null));
        }
        for (name, sub) in &self.subs {
            map.insert(name.clone(), sub.to_json()?);
        }
        for name in self.lists.keys() {
            let items = self
                .list(name)?
                .unwrap_or_default()
                .iter()
                .map(|item| item.to_json())
                .collect::<ConfigResult<Vec<_>>>()?;
            map.insert(name.clone(), Value::Array(items));
        }
        Ok(Value::Object(map))
    }

    /// Bind the instance graph to `T` via serde.
    ///
    /// # Errors
    ///
    /// Returns rendering errors and [`ConfigError::Deserialize`].
    pub fn deserialize<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_json::from_value(self.to_json()?).into_config()
    }

    /// Every present value under its primary candidate key, as raw strings.
    ///
    /// Encrypted properties are left out. Feeding the result back as a
    /// source reproduces the remaining values.
    ///
    /// # Errors
    ///
    /// Returns resolution and rendering errors.
    pub fn to_flat_map(&self) -> ConfigResult<BTreeMap<String, String>> {
        let mut flat = BTreeMap::new();
        self.flatten_into(&mut flat)?;
        Ok(flat)
    }

    fn flatten_into(&self, flat: &mut BTreeMap<String, String>) -> ConfigResult<()> {
        for value in self.values.values() {
            if value.resolution().is_encrypted() {
                continue;
            }
            let key = value.resolution().candidates().primary();
            if let (Some(key), Some(raw)) = (key, value.render()?) {
                flat.entry(key.to_owned()).or_insert(raw);
            }
        }
        for sub in self.subs.values() {
            sub.flatten_into(flat)?;
        }
        for name in self.lists.keys() {
            for item in self.list(name)?.unwrap_or_default().iter() {
                item.flatten_into(flat)?;
            }
        }
        Ok(())
    }
}
