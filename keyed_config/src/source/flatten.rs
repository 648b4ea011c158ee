//! Source that flattens a [`Figment`] into dotted keys.
//!
//! Nested tables join with `.`, array elements append `[i]` directly and
//! scalars are stringified, so a TOML file such as
//!
//! ```toml
//! [[servers]]
//! port = 80
//! ```
//!
//! exposes `servers[0].port = "80"` together with `servers.size = "1"`.
//! Arrays of scalars are also joined with commas under their own key, which
//! is the form list-typed values parse. An array holding a string that
//! itself contains a comma gets no joined key, since the joined form could
//! not be split back into the same elements; its `[i]` keys remain.

use std::collections::BTreeMap;

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde_json::Value;

use super::{ConfigSource, MapSource};
use crate::key::KEY_SEPARATOR;
use crate::result_ext::GatheringResultExt;
use crate::{Attributes, ConfigResult, LIST_SIZE_SUFFIX};

/// Snapshot of a figment's data as a flat key space.
///
/// Scalar arrays are joined with commas only when no element contains a
/// comma; see the module docs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FigmentSource {
    flat: MapSource,
}

fn flatten_into(prefix: &str, value: Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}{KEY_SEPARATOR}{key}")
                };
                flatten_into(&path, child, out);
            }
        }
        Value::Array(items) => {
            if !prefix.is_empty() {
                out.entry(format!("{prefix}{KEY_SEPARATOR}{LIST_SIZE_SUFFIX}"))
                    .or_insert_with(|| items.len().to_string());
                if let Some(joined) = join_scalars(&items) {
                    out.insert(prefix.to_owned(), joined);
                }
            }
            for (index, child) in items.into_iter().enumerate() {
                flatten_into(&format!("{prefix}[{index}]"), child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_owned(), text);
        }
        Value::Bool(_) | Value::Number(_) => {
            out.insert(prefix.to_owned(), value.to_string());
        }
    }
}

fn join_scalars(items: &[Value]) -> Option<String> {
    items
        .iter()
        .map(|item| match item {
            Value::String(text) if !text.contains(',') => Some(text.clone()),
            Value::Bool(_) | Value::Number(_) => Some(item.to_string()),
            Value::String(_) => None,
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.join(","))
}

impl FigmentSource {
    /// Flatten the data currently provided by `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Gathering`] when a provider fails.
    pub fn from_figment(figment: &Figment) -> ConfigResult<Self> {
        let data: Value = figment.extract().into_gathering()?;
        let mut flat = BTreeMap::new();
        flatten_into("", data, &mut flat);
        Ok(Self { flat: flat.into() })
    }

    /// Flatten a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Gathering`] when `toml` does not parse.
    pub fn from_toml_str(toml: &str) -> ConfigResult<Self> {
        Self::from_figment(&Figment::from(Toml::string(toml)))
    }

    /// Flatten a TOML file. A missing file yields an empty source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Gathering`] when the file cannot be read
    /// or parsed.
    pub fn from_toml_file(path: &Utf8Path) -> ConfigResult<Self> {
        Self::from_figment(&Figment::from(Toml::file(path.as_std_path())))
    }

    /// Flatten environment variables starting with `prefix`.
    ///
    /// The prefix is stripped, `__` separates nesting levels and keys are
    /// lowercased: `APP_DB__URL` becomes `db.url`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Gathering`] when the environment cannot
    /// be collected.
    pub fn from_env(prefix: &str) -> ConfigResult<Self> {
        Self::from_figment(&Figment::from(Env::prefixed(prefix).split("__")))
    }

    /// Flattened entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.flat.iter()
    }

    /// Number of flattened keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    /// Returns `true` when the figment held no scalar values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

impl ConfigSource for FigmentSource {
    fn get_value(&self, key: &str, attributes: &Attributes) -> Option<String> {
        self.flat.get_value(key, attributes)
    }
}
