//! Attribute sets with alias normalization.

use indexmap::IndexMap;

/// Canonical name of the class list attribute.
pub const CLASS_NAME: &str = "className";
/// Canonical name of the document-wide identifier attribute.
pub const ID: &str = "id";
/// Canonical name of the attribute a parent uses to index its children.
pub const KEY: &str = "key";
/// Canonical name of the text content attribute.
pub const INNER_TEXT: &str = "innerText";

/// Resolve an attribute name through the alias table.
///
/// Names without an alias are returned unchanged.
pub fn canonical_name(name: &str) -> &str {
    match name {
        "c" | "class" | "Class" => CLASS_NAME,
        "i" => ID,
        "k" => KEY,
        "t" | "txt" | "text" | "Text" => INNER_TEXT,
        other => other,
    }
}

/// A mapping of canonical attribute names to string values.
///
/// Aliases are resolved once, when a value is inserted. Two sets compare equal when
/// they hold the same entries, regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "IndexMap<String, String>", into = "IndexMap<String, String>")
)]
pub struct AttributeSet {
    entries: IndexMap<String, String>,
}

impl AttributeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Store `value` under the canonical form of `name`, replacing any previous value.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = canonical_name(name.as_ref()).to_string();
        self.entries.insert(name, value.into());
    }

    /// Builder form of [`AttributeSet::set`].
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a value. Aliases are accepted.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(canonical_name(name)).map(String::as_str)
    }

    /// Check whether a value is stored for `name`. Aliases are accepted.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(canonical_name(name))
    }

    /// The `key` attribute, if any.
    pub fn key(&self) -> Option<&str> {
        self.get(KEY)
    }

    /// The `id` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.get(ID)
    }

    /// Iterate over `(canonical name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for AttributeSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = AttributeSet::new();
        attrs.extend(iter);
        attrs
    }
}

impl From<IndexMap<String, String>> for AttributeSet {
    fn from(raw: IndexMap<String, String>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<AttributeSet> for IndexMap<String, String> {
    fn from(attrs: AttributeSet) -> Self {
        attrs.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_table() {
        assert_eq!(canonical_name("c"), "className");
        assert_eq!(canonical_name("Class"), "className");
        assert_eq!(canonical_name("i"), "id");
        assert_eq!(canonical_name("k"), "key");
        assert_eq!(canonical_name("txt"), "innerText");
        assert_eq!(canonical_name("Text"), "innerText");
        assert_eq!(canonical_name("href"), "href");
    }

    #[test]
    fn test_alias_and_canonical_share_a_slot() {
        let mut attrs = AttributeSet::new();
        attrs.set("c", "first");
        attrs.set("className", "second");

        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("className"), Some("second"));
        assert_eq!(attrs.get("c"), Some("second"));
    }

    #[test]
    fn test_from_pairs_applies_aliases_in_order() {
        let attrs: AttributeSet = [("k", "row"), ("key", "cell"), ("t", "hi")]
            .into_iter()
            .collect();

        assert_eq!(attrs.key(), Some("cell"));
        assert_eq!(attrs.get(INNER_TEXT), Some("hi"));
        assert!(attrs.id().is_none());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = AttributeSet::new().with("x", "1").with("y", "2");
        let b = AttributeSet::new().with("y", "2").with("x", "1");
        assert_eq!(a, b);
    }
}
