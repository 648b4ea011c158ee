//! Intermediate representation (IR) types for key documentation.
//!
//! These structures are serialisable so external tooling can render them as
//! reference pages or sample configuration files.

use serde::Serialize;

/// Documentation for every key a configuration type reads.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigDocs {
    /// Version of this IR schema.
    pub ir_version: String,
    /// Type name of the documented root.
    pub type_name: String,
    /// One entry per value property, in declaration order.
    pub entries: Vec<KeyDoc>,
}

/// Documentation for one value property.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeyDoc {
    /// Dotted property path from the root, lists marked with `[*]`.
    pub path: String,
    /// Candidate keys in lookup order; list indexes appear as `[*]`.
    pub keys: Vec<String>,
    /// Declared value type.
    pub value_type: String,
    /// Effective default, if any.
    pub default: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
    /// Whether resolution fails without a value or default.
    pub required: bool,
    /// Whether values pass through a decryption provider.
    pub encrypted: bool,
}
