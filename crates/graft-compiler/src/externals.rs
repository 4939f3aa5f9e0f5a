//! External tokens and the recognizers that scan them.
//!
//! The host parser binds external tokens to scanner code by position, so the
//! declaration order is part of the grammar's ABI. [`ExternalBinding`] pins that
//! order down and fingerprints it, so a reordered list is caught instead of
//! silently scanning the wrong token.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use indexmap::IndexMap;

use graft_core::Grammar;

use crate::error::DuplicateExternalError;

/// Returned by a recognizer that does not accept the input at the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no match")]
pub struct NoMatch;

/// Scanner state handed to a recognizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    /// Delimiter of an already opened literal, when the body is scanned separately.
    pub delimiter: Option<String>,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: Some(delimiter.into()),
        }
    }
}

/// Scans one external token.
///
/// On success returns the consumed byte range, which starts at `position`.
pub trait Recognizer: Send + Sync {
    fn recognize(
        &self,
        input: &str,
        position: usize,
        ctx: &ScanContext,
    ) -> Result<Range<usize>, NoMatch>;
}

/// Ordered external token names, each with an optional recognizer.
#[derive(Clone, Default)]
pub struct ExternalTokens {
    entries: IndexMap<String, Option<Arc<dyn Recognizer>>>,
}

impl ExternalTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a token and the recognizer that scans it.
    pub fn register(
        &mut self,
        name: &str,
        recognizer: impl Recognizer + 'static,
    ) -> Result<(), DuplicateExternalError> {
        self.insert(name, Some(Arc::new(recognizer)))
    }

    /// Declare a token whose recognizer is provided elsewhere.
    pub fn declare(&mut self, name: &str) -> Result<(), DuplicateExternalError> {
        self.insert(name, None)
    }

    fn insert(
        &mut self,
        name: &str,
        recognizer: Option<Arc<dyn Recognizer>>,
    ) -> Result<(), DuplicateExternalError> {
        if self.entries.contains_key(name) {
            return Err(DuplicateExternalError {
                name: name.to_owned(),
            });
        }
        self.entries.insert(name.to_owned(), recognizer);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn recognizer(&self, name: &str) -> Option<&Arc<dyn Recognizer>> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExternalTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(name, rec)| (name, rec.as_ref().map(|_| "<recognizer>"))),
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("external token `{name}` (index {index}) has no recognizer")]
    UnboundExternal { name: String, index: usize },
}

/// Recognizers lined up with a grammar's `externals`, by position.
#[derive(Clone)]
pub struct ExternalBinding {
    slots: Vec<(String, Arc<dyn Recognizer>)>,
}

impl ExternalBinding {
    /// Bind every external of `grammar`, in order, to its recognizer in `tokens`.
    pub fn bind(grammar: &Grammar, tokens: &ExternalTokens) -> Result<Self, BindError> {
        let mut slots = Vec::new();
        for (index, name) in grammar.external_names().enumerate() {
            let Some(recognizer) = tokens.recognizer(name) else {
                return Err(BindError::UnboundExternal {
                    name: name.to_owned(),
                    index,
                });
            };
            slots.push((name.to_owned(), Arc::clone(recognizer)));
        }
        Ok(Self { slots })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|(n, _)| n == name)
    }

    pub fn recognizer(&self, index: usize) -> Option<&dyn Recognizer> {
        self.slots.get(index).map(|(_, r)| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Checksum of the ordered names. Any reordering changes it.
    pub fn fingerprint(&self) -> u32 {
        fingerprint(self.names())
    }
}

impl fmt::Debug for ExternalBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalBinding")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Checksum of an ordered list of external token names.
pub fn fingerprint<'a>(names: impl IntoIterator<Item = &'a str>) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}
