//! Insertion-ordered column mapping.

use serde::{Deserialize, Serialize};

/// One `source → target` pair of a [`ColumnMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source: String,
    pub target: String,
}

/// Ordered mapping from a source column name to a destination column name.
///
/// The keys select exactly which source columns are kept; the values rename
/// them. Iteration follows insertion order, which the census fetcher relies
/// on to build its query deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    entries: Vec<MappingEntry>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair. Re-inserting a source replaces its target in place.
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.entries.iter_mut().find(|entry| entry.source == source) {
            Some(entry) => entry.target = target,
            None => self.entries.push(MappingEntry { source, target }),
        }
    }

    #[must_use]
    pub fn with(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(source, target);
        self
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.source == source)
            .map(|entry| entry.target.as_str())
    }

    pub fn contains_key(&self, source: &str) -> bool {
        self.entries.iter().any(|entry| entry.source == source)
    }

    pub fn contains_target(&self, target: &str) -> bool {
        self.entries.iter().any(|entry| entry.target == target)
    }

    /// Source column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.source.as_str())
    }

    /// Destination column names in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.target.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.source.as_str(), entry.target.as_str()))
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ColumnMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (source, target) in iter {
            mapping.insert(source, target);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mapping: ColumnMapping = [("B2", "second"), ("B1", "first"), ("B3", "third")]
            .into_iter()
            .collect();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["B2", "B1", "B3"]);
        assert_eq!(
            mapping.targets().collect::<Vec<_>>(),
            vec!["second", "first", "third"]
        );
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut mapping = ColumnMapping::new().with("a", "x").with("b", "y");
        mapping.insert("a", "z");
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("a"), Some("z"));
        assert_eq!(mapping.keys().next(), Some("a"));
    }

    #[test]
    fn lookups() {
        let mapping = ColumnMapping::new().with("B01001_001E", "Total Population");
        assert!(mapping.contains_key("B01001_001E"));
        assert!(mapping.contains_target("Total Population"));
        assert!(!mapping.contains_key("Total Population"));
        assert_eq!(mapping.get("missing"), None);
    }
}
