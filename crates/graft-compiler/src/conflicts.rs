//! Declared ambiguities.
//!
//! A conflict entry tells the parse table generator that the named rules may
//! legitimately compete for the same input. The set only records and unions
//! entries; whether a real ambiguity is missing is for the generator to say.

use indexmap::IndexSet;

use crate::error::InvalidConflictError;

/// Ordered set of conflict entries.
///
/// Identical tuples (same names, same order) collapse; anything else is kept as
/// declared, including the same names in a different order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictSet {
    entries: IndexSet<Vec<String>>,
}

impl ConflictSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of entries taken from a grammar as-is.
    pub fn from_entries(entries: impl IntoIterator<Item = Vec<String>>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Declare an entry. Returns `false` if the same tuple was already declared.
    pub fn declare<S: Into<String>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<bool, InvalidConflictError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let distinct: IndexSet<&str> = names.iter().map(String::as_str).collect();
        if distinct.len() < 2 {
            return Err(InvalidConflictError { names });
        }
        Ok(self.entries.insert(names))
    }

    /// Add every entry of `other` after the entries already present.
    pub fn union(&mut self, other: &ConflictSet) {
        for entry in &other.entries {
            if !self.entries.contains(entry) {
                self.entries.insert(entry.clone());
            }
        }
    }

    pub fn contains(&self, names: &[&str]) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.iter().map(String::as_str).eq(names.iter().copied()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.entries.iter().map(Vec::as_slice)
    }

    /// Whether every entry of `other` is also in this set.
    pub fn is_superset(&self, other: &ConflictSet) -> bool {
        other.entries.iter().all(|entry| self.entries.contains(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Vec<String>> {
        self.entries.into_iter().collect()
    }
}
