//! Property descriptors: values, nested configurations, and lists of them.

use super::{Attributes, DefaultOverrides, DefaultValue, NodeId, ValueType};

/// Suffix used for the synthetic size key of a list property.
pub const LIST_SIZE_SUFFIX: &str = "size";

/// Name under which the resolved size of the list `list` is stored.
#[must_use]
pub fn list_size_name(list: &str) -> String {
    format!("{list}.{LIST_SIZE_SUFFIX}")
}

/// Fields shared by every property variant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyInfo {
    /// Property name; also the lookup key when no keys are declared.
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// Custom attributes, merged over the enclosing attributes.
    pub attributes: Attributes,
}

impl PropertyInfo {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One property of a [`super::ConfigModel`].
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    /// A scalar value looked up in the source.
    Value(ValueProperty),
    /// A nested configuration.
    Sub(SubConfigProperty),
    /// A list of nested configurations.
    SubList(SubConfigListProperty),
}

impl Property {
    /// Shared descriptor fields.
    #[must_use]
    pub const fn info(&self) -> &PropertyInfo {
        match self {
            Self::Value(p) => &p.info,
            Self::Sub(p) => &p.info,
            Self::SubList(p) => &p.info,
        }
    }

    /// Property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.info().name
    }
}

impl From<ValueProperty> for Property {
    fn from(property: ValueProperty) -> Self {
        Self::Value(property)
    }
}

impl From<SubConfigProperty> for Property {
    fn from(property: SubConfigProperty) -> Self {
        Self::Sub(property)
    }
}

impl From<SubConfigListProperty> for Property {
    fn from(property: SubConfigListProperty) -> Self {
        Self::SubList(property)
    }
}

/// Scalar property resolved from the source.
///
/// # Examples
///
/// ```
/// use keyed_config::{ValueProperty, ValueType};
///
/// let port = ValueProperty::new("port", ValueType::Unsigned)
///     .key("port")
///     .key("listen_port")
///     .default_value("8080");
/// assert_eq!(port.lookup_keys(), ["port", "listen_port"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueProperty {
    /// Shared descriptor fields.
    pub info: PropertyInfo,
    /// Declared value type.
    pub value_type: ValueType,
    /// Declared key names; empty means the property name.
    pub keys: Vec<String>,
    /// Absolute key tried after every prefixed candidate.
    pub fallback_key: Option<String>,
    /// Ignore the enclosing prefixes for this property.
    pub reset_prefix: bool,
    /// Static default, converted like a source value.
    pub default: Option<String>,
    /// Named decryption provider applied before conversion.
    pub decryptor: Option<String>,
    /// Named converter used instead of the type-based lookup.
    pub converter: Option<String>,
    /// Fail resolution when neither a value nor a default exists.
    pub required: bool,
}

impl ValueProperty {
    /// Describe a value property of type `value_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            info: PropertyInfo::named(name),
            value_type,
            keys: Vec::new(),
            fallback_key: None,
            reset_prefix: false,
            default: None,
            decryptor: None,
            converter: None,
            required: false,
        }
    }

    /// Add a declared key name.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Set the absolute fallback key.
    #[must_use]
    pub fn fallback_key(mut self, key: impl Into<String>) -> Self {
        self.fallback_key = Some(key.into());
        self
    }

    /// Ignore enclosing prefixes.
    #[must_use]
    pub const fn reset_prefix(mut self) -> Self {
        self.reset_prefix = true;
        self
    }

    /// Set the static default.
    #[must_use]
    pub fn default_value(mut self, raw: impl Into<String>) -> Self {
        self.default = Some(raw.into());
        self
    }

    /// Decrypt values through the provider registered as `name`.
    #[must_use]
    pub fn decrypt_with(mut self, name: impl Into<String>) -> Self {
        self.decryptor = Some(name.into());
        self
    }

    /// Convert values with the converter registered as `name`.
    #[must_use]
    pub fn converter(mut self, name: impl Into<String>) -> Self {
        self.converter = Some(name.into());
        self
    }

    /// Require a value or default.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.info.description = Some(text.into());
        self
    }

    /// Attach a custom attribute.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.attributes.insert(key.into(), value.into());
        self
    }

    /// Keys used for lookup: the declared keys, or the property name.
    #[must_use]
    pub fn lookup_keys(&self) -> Vec<String> {
        if self.keys.is_empty() {
            vec![self.info.name.clone()]
        } else {
            self.keys.clone()
        }
    }

    /// Effective default after applying an override from the parent.
    #[must_use]
    pub fn effective_default<'a>(&'a self, over: Option<&'a DefaultValue>) -> Option<&'a str> {
        let static_default = self.default.as_deref();
        over.map_or(static_default, |value| value.over(static_default))
    }
}

/// Nested configuration property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubConfigProperty {
    /// Shared descriptor fields.
    pub info: PropertyInfo,
    /// Model of the nested configuration.
    pub node: NodeId,
    /// Segments appended before descending.
    pub prefixes: Vec<String>,
    /// Ignore the enclosing prefixes before appending `prefixes`.
    pub reset_prefix: bool,
    /// Absolute key recorded for the nested configuration.
    pub fallback_key: Option<String>,
    /// Overrides for the nested model's static defaults.
    pub default_values: DefaultOverrides,
}

impl SubConfigProperty {
    /// Describe a nested configuration built from `node`.
    #[must_use]
    pub fn new(name: impl Into<String>, node: NodeId) -> Self {
        Self {
            info: PropertyInfo::named(name),
            node,
            prefixes: Vec::new(),
            reset_prefix: false,
            fallback_key: None,
            default_values: DefaultOverrides::new(),
        }
    }

    /// Append a key segment.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Ignore enclosing prefixes.
    #[must_use]
    pub const fn reset_prefix(mut self) -> Self {
        self.reset_prefix = true;
        self
    }

    /// Set the absolute fallback key.
    #[must_use]
    pub fn fallback_key(mut self, key: impl Into<String>) -> Self {
        self.fallback_key = Some(key.into());
        self
    }

    /// Override the default of the nested property `property`.
    #[must_use]
    pub fn default_for(
        mut self,
        property: impl Into<String>,
        value: impl Into<DefaultValue>,
    ) -> Self {
        self.default_values.insert(property.into(), value.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.info.description = Some(text.into());
        self
    }

    /// Attach a custom attribute.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.attributes.insert(key.into(), value.into());
        self
    }
}

/// List of nested configurations.
///
/// # Examples
///
/// ```
/// use keyed_config::{ConfigModel, Schema, SubConfigListProperty};
///
/// let mut builder = Schema::builder();
/// let server = builder.add(ConfigModel::new("Server"));
/// let servers = SubConfigListProperty::new("servers", server)
///     .prefix("servers")
///     .default_size(2);
/// let size = servers.size_property();
/// assert_eq!(size.info.name, "servers.size");
/// assert_eq!(size.keys, ["servers.size"]);
/// assert_eq!(size.default.as_deref(), Some("2"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubConfigListProperty {
    /// Shared descriptor fields.
    pub info: PropertyInfo,
    /// Model of each list item.
    pub node: NodeId,
    /// Segments appended before indexing.
    pub prefixes: Vec<String>,
    /// Ignore the enclosing prefixes before appending `prefixes`.
    pub reset_prefix: bool,
    /// Length used when the source gives no explicit size.
    pub default_size: usize,
    /// Default overrides for item `i`; missing entries mean no overrides.
    pub per_index_defaults: Vec<DefaultOverrides>,
}

impl SubConfigListProperty {
    /// Describe a list of configurations built from `node`.
    #[must_use]
    pub fn new(name: impl Into<String>, node: NodeId) -> Self {
        Self {
            info: PropertyInfo::named(name),
            node,
            prefixes: Vec::new(),
            reset_prefix: false,
            default_size: 0,
            per_index_defaults: Vec::new(),
        }
    }

    /// Append a key segment.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Ignore enclosing prefixes.
    #[must_use]
    pub const fn reset_prefix(mut self) -> Self {
        self.reset_prefix = true;
        self
    }

    /// Set the default list length.
    #[must_use]
    pub const fn default_size(mut self, size: usize) -> Self {
        self.default_size = size;
        self
    }

    /// Append the default overrides for the next index.
    #[must_use]
    pub fn item_defaults(mut self, defaults: DefaultOverrides) -> Self {
        self.per_index_defaults.push(defaults);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.info.description = Some(text.into());
        self
    }

    /// Attach a custom attribute.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.attributes.insert(key.into(), value.into());
        self
    }

    /// Default overrides for item `index`.
    #[must_use]
    pub fn defaults_for(&self, index: usize) -> Option<&DefaultOverrides> {
        self.per_index_defaults.get(index)
    }

    /// Name under which the resolved size is stored.
    #[must_use]
    pub fn size_name(&self) -> String {
        list_size_name(&self.info.name)
    }

    /// Synthetic value property describing the list size.
    #[must_use]
    pub fn size_property(&self) -> ValueProperty {
        let keys = if self.prefixes.is_empty() {
            vec![LIST_SIZE_SUFFIX.to_owned()]
        } else {
            self.prefixes
                .iter()
                .map(|prefix| format!("{prefix}.{LIST_SIZE_SUFFIX}"))
                .collect()
        };
        ValueProperty {
            info: PropertyInfo {
                name: self.size_name(),
                description: Some(format!("Number of entries in '{}'", self.info.name)),
                attributes: self.info.attributes.clone(),
            },
            value_type: ValueType::Integer,
            keys,
            fallback_key: None,
            reset_prefix: self.reset_prefix,
            default: Some(self.default_size.to_string()),
            decryptor: None,
            converter: None,
            required: false,
        }
    }
}
