//! Ordered in-memory collection of entries.
//!
//! The journal is owned by whoever drives the store (the CLI) and is passed
//! to it explicitly. Positions are 0-based here; callers showing numbered
//! lists convert at the boundary.

use crate::{Error, FitnessEntry, Result};

/// An ordered list of entries, kept in insertion/file order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Journal {
    entries: Vec<FitnessEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<FitnessEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FitnessEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FitnessEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FitnessEntry> {
        self.entries.get(index)
    }

    /// Append a new entry
    pub fn push(&mut self, entry: FitnessEntry) {
        self.entries.push(entry);
    }

    /// Append entries loaded from elsewhere, keeping their order
    pub fn extend(&mut self, entries: impl IntoIterator<Item = FitnessEntry>) {
        self.entries.extend(entries);
    }

    /// Swap the entry at `index` for `entry`, returning the old one
    pub fn replace(&mut self, index: usize, entry: FitnessEntry) -> Result<FitnessEntry> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.entries[index], entry))
    }

    /// Remove and return the entry at `index`
    pub fn remove(&mut self, index: usize) -> Result<FitnessEntry> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(Error::InvalidPosition {
                position: index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a FitnessEntry;
    type IntoIter = std::slice::Iter<'a, FitnessEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str) -> FitnessEntry {
        FitnessEntry::new(date, 70, 7500, 400, 8.0, 71.0).unwrap()
    }

    fn dates(journal: &Journal) -> Vec<&str> {
        journal.iter().map(|e| e.date()).collect()
    }

    #[test]
    fn test_push_keeps_order() {
        let mut journal = Journal::new();
        journal.push(entry("a"));
        journal.push(entry("b"));
        journal.extend(vec![entry("c"), entry("d")]);

        assert_eq!(journal.len(), 4);
        assert_eq!(dates(&journal), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_replace() {
        let mut journal = Journal::from_entries(vec![entry("a"), entry("b")]);

        let old = journal.replace(1, entry("z")).unwrap();
        assert_eq!(old.date(), "b");
        assert_eq!(dates(&journal), vec!["a", "z"]);
        assert_eq!(journal.get(1).map(|e| e.date()), Some("z"));
        assert!(journal.get(2).is_none());
    }

    #[test]
    fn test_remove() {
        let mut journal = Journal::from_entries(vec![entry("a"), entry("b"), entry("c")]);

        let removed = journal.remove(1).unwrap();
        assert_eq!(removed.date(), "b");
        assert_eq!(dates(&journal), vec!["a", "c"]);
    }

    #[test]
    fn test_out_of_range_leaves_journal_unchanged() {
        let mut journal = Journal::from_entries(vec![entry("a")]);

        assert!(matches!(
            journal.remove(1),
            Err(Error::InvalidPosition { position: 1, len: 1 })
        ));
        assert!(journal.replace(5, entry("x")).is_err());
        assert_eq!(dates(&journal), vec!["a"]);

        let mut empty = Journal::new();
        assert!(empty.remove(0).is_err());
        assert!(empty.is_empty());
    }
}
