//! Declared value types.

use std::fmt;

/// Type a value property converts its raw string into.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueType {
    /// UTF-8 text, taken verbatim.
    String,
    /// `true` or `false`, case-insensitive.
    Bool,
    /// Signed 64-bit integer.
    Integer,
    /// Unsigned 64-bit integer.
    Unsigned,
    /// 64-bit float.
    Float,
    /// Comma-separated list of the inner type.
    List(Box<ValueType>),
    /// Type handled only by a registered custom converter.
    Custom(String),
}

impl ValueType {
    /// Convenience constructor for [`ValueType::List`].
    #[must_use]
    pub fn list_of(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Bool => f.write_str("bool"),
            Self::Integer => f.write_str("integer"),
            Self::Unsigned => f.write_str("unsigned integer"),
            Self::Float => f.write_str("float"),
            Self::List(inner) => write!(f, "list of {inner}"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}
