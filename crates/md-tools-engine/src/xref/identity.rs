//! Dense first-occurrence numbering of identities.

use std::collections::HashMap;
use std::hash::Hash;

/// Maps identity keys to numbers `1..=len` in order of first appearance.
/// Numbers are never reassigned once given.
#[derive(Debug, Clone)]
pub struct IdentityTable<K> {
    numbers: HashMap<K, usize>,
    entries: Vec<K>,
}

impl<K> Default for IdentityTable<K> {
    fn default() -> Self {
        Self {
            numbers: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> IdentityTable<K> {
    /// Folds `keys` (already in document order) into a table.
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        keys.into_iter().fold(Self::default(), Self::with)
    }

    fn with(mut self, key: K) -> Self {
        if !self.numbers.contains_key(&key) {
            self.entries.push(key.clone());
            self.numbers.insert(key, self.entries.len());
        }
        self
    }

    pub fn number_of(&self, key: &K) -> Option<usize> {
        self.numbers.get(key).copied()
    }

    /// `(number, key)` pairs in ascending number order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &K)> {
        self.entries.iter().enumerate().map(|(i, k)| (i + 1, k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_by_first_appearance() {
        let table = IdentityTable::from_keys(["b", "a", "b", "c", "a"]);
        assert_eq!(table.number_of(&"b"), Some(1));
        assert_eq!(table.number_of(&"a"), Some(2));
        assert_eq!(table.number_of(&"c"), Some(3));
        assert_eq!(table.number_of(&"z"), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn entries_are_ascending_and_dense() {
        let table = IdentityTable::from_keys(["x", "y", "x"]);
        let entries: Vec<_> = table.entries().collect();
        assert_eq!(entries, vec![(1, &"x"), (2, &"y")]);
    }

    #[test]
    fn empty_table() {
        let table: IdentityTable<String> = IdentityTable::from_keys(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.entries().count(), 0);
    }
}
