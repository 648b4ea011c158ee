//! Default-value overrides and their sentinels.

use std::collections::BTreeMap;

/// Default override for one property of a nested configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultValue {
    /// Use this raw string as the default.
    Value(String),
    /// Inherit the property's own static default.
    Skip,
    /// Resolve to an explicit absent value.
    Null,
}

impl DefaultValue {
    /// Declared marker that maps to [`DefaultValue::Skip`].
    pub const SKIP_MARKER: &'static str = "<skip>";
    /// Declared marker that maps to [`DefaultValue::Null`].
    pub const NULL_MARKER: &'static str = "<null>";

    /// Interpret a declared default, recognising the sentinel markers.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_config::DefaultValue;
    ///
    /// assert_eq!(DefaultValue::from_declared("<skip>"), DefaultValue::Skip);
    /// assert_eq!(DefaultValue::from_declared("<null>"), DefaultValue::Null);
    /// assert_eq!(
    ///     DefaultValue::from_declared("8080"),
    ///     DefaultValue::Value("8080".into())
    /// );
    /// ```
    #[must_use]
    pub fn from_declared(raw: &str) -> Self {
        match raw {
            Self::SKIP_MARKER => Self::Skip,
            Self::NULL_MARKER => Self::Null,
            other => Self::Value(other.to_owned()),
        }
    }

    /// Apply this override over a property's static default.
    #[must_use]
    pub fn over<'a>(&'a self, static_default: Option<&'a str>) -> Option<&'a str> {
        match self {
            Self::Value(raw) => Some(raw),
            Self::Skip => static_default,
            Self::Null => None,
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(raw: &str) -> Self {
        Self::from_declared(raw)
    }
}

/// Per-property default overrides, keyed by property name.
pub type DefaultOverrides = BTreeMap<String, DefaultValue>;
