//! Rule name interning.
//!
//! The analysis passes work on [`RuleId`] handles instead of strings, so the rule
//! graph is an arena indexed by id and cyclic references are plain lookups.

use std::collections::HashMap;

/// Handle to an interned rule name.
///
/// Ids are dense and follow insertion order, so they can index a `Vec`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Deduplicating store of rule names.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    map: HashMap<String, RuleId>,
    names: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern every name of an iterator, in order.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut interner = Self::new();
        for name in names {
            interner.intern(name);
        }
        interner
    }

    /// Intern a name, returning the existing id if it was seen before.
    pub fn intern(&mut self, name: &str) -> RuleId {
        if let Some(&id) = self.map.get(name) {
            return id;
        }

        let id = RuleId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.map.insert(name.to_owned(), id);
        id
    }

    /// Id of an already interned name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<RuleId> {
        self.map.get(name).copied()
    }

    /// Resolve an id back to its name.
    ///
    /// # Panics
    /// Panics if the id was not created by this interner.
    #[inline]
    pub fn resolve(&self, id: RuleId) -> &str {
        &self.names[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All ids with their names, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (RuleId(i as u32), name.as_str()))
    }
}
