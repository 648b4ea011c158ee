//! Immutable prefix sets and their composition rules.

/// Separator placed between a non-empty prefix and the next key segment.
pub const KEY_SEPARATOR: char = '.';

/// Immutable set of alternative key prefixes.
///
/// An empty generator means "no prefix" and behaves like a single empty
/// prefix. Every operation returns a new generator.
///
/// # Examples
///
/// ```
/// use keyed_config::KeyGenerator;
///
/// let keys = KeyGenerator::empty()
///     .append(&["db"])
///     .append_index(1)
///     .compute_keys("url");
/// assert_eq!(keys, ["db[1].url", "db.url"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyGenerator {
    prefixes: Vec<String>,
}

fn combine(prefix: &str, suffix: &str) -> String {
    if prefix.is_empty() {
        suffix.to_owned()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{suffix}")
    }
}

impl KeyGenerator {
    /// Generator with no prefixes.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            prefixes: Vec::new(),
        }
    }

    /// Generator holding exactly `prefixes`, in order.
    #[must_use]
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Prefixes currently held, in priority order.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns `true` when the generator contributes no prefix.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Compose `suffixes` onto every held prefix.
    ///
    /// The product is built suffix-major: all prefixes combined with the
    /// first suffix come before any combined with the second.
    #[must_use]
    pub fn append<S: AsRef<str>>(&self, suffixes: &[S]) -> Self {
        if suffixes.is_empty() {
            return self.clone();
        }
        if self.prefixes.is_empty() {
            return Self::from_prefixes(suffixes.iter().map(|s| s.as_ref().to_owned()));
        }
        let prefixes = suffixes
            .iter()
            .flat_map(|suffix| {
                self.prefixes
                    .iter()
                    .map(move |prefix| combine(prefix, suffix.as_ref()))
            })
            .collect();
        Self { prefixes }
    }

    /// Add a list index.
    ///
    /// Indexed prefixes (`p[i]`) come first, followed by the original
    /// un-indexed prefixes so a list-wide key can serve every element.
    #[must_use]
    pub fn append_index(&self, index: usize) -> Self {
        self.append_bracketed(&index.to_string())
    }

    pub(crate) fn append_bracketed(&self, label: &str) -> Self {
        let bracketed = format!("[{label}]");
        if self.prefixes.is_empty() {
            return Self {
                prefixes: vec![bracketed],
            };
        }
        let prefixes = self
            .prefixes
            .iter()
            .map(|prefix| format!("{prefix}{bracketed}"))
            .chain(self.prefixes.iter().cloned())
            .collect();
        Self { prefixes }
    }

    /// Final lookup keys for a single `suffix`.
    #[must_use]
    pub fn compute_keys(&self, suffix: &str) -> Vec<String> {
        self.compute_keys_for(&[suffix])
    }

    /// Final lookup keys for several suffixes, prefix-major.
    #[must_use]
    pub fn compute_keys_for<S: AsRef<str>>(&self, suffixes: &[S]) -> Vec<String> {
        if self.prefixes.is_empty() {
            return suffixes.iter().map(|s| s.as_ref().to_owned()).collect();
        }
        self.prefixes
            .iter()
            .flat_map(|prefix| {
                suffixes
                    .iter()
                    .map(move |suffix| combine(prefix, suffix.as_ref()))
            })
            .collect()
    }
}
