//! Ordered, de-duplicated lookup keys for one property.

use std::collections::HashSet;

use super::KeyGenerator;

/// Candidate keys for a single value resolution.
///
/// Keys are consulted strictly in order; the first key with a present
/// source value wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateKeys {
    keys: Vec<String>,
}

impl CandidateKeys {
    /// Build the candidate list for `keys` under `generator`.
    ///
    /// Keys derived from `generator` come first, then the same keys under
    /// the `fallback_prefixes` namespace, then the absolute `fallback_key`
    /// when it is not blank. Later duplicates are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_config::{CandidateKeys, KeyGenerator};
    ///
    /// let root = KeyGenerator::empty().append(&["root"]);
    /// let global = KeyGenerator::empty().append(&["global"]);
    /// let keys = CandidateKeys::build(&root, &["url"], Some(&global), Some("URL"));
    /// assert_eq!(keys.as_slice(), ["root.url", "global.url", "URL"]);
    /// ```
    #[must_use]
    pub fn build<S: AsRef<str>>(
        generator: &KeyGenerator,
        keys: &[S],
        fallback_prefixes: Option<&KeyGenerator>,
        fallback_key: Option<&str>,
    ) -> Self {
        let mut ordered = generator.compute_keys_for(keys);
        if let Some(fallback) = fallback_prefixes {
            ordered.extend(fallback.compute_keys_for(keys));
        }
        if let Some(key) = fallback_key.filter(|key| !key.trim().is_empty()) {
            ordered.push(key.to_owned());
        }
        let mut seen = HashSet::with_capacity(ordered.len());
        ordered.retain(|key| seen.insert(key.clone()));
        Self { keys: ordered }
    }

    /// Keys in lookup order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    /// First key, used when a value must be reported under one name.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }

    /// Iterate the keys in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of candidate keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` when no key is available.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<CandidateKeys> for Vec<String> {
    fn from(keys: CandidateKeys) -> Self {
        keys.keys
    }
}
