//! Compact binary form of an assembled grammar, using postcard.
//!
//! Every field of [`Grammar`] is kept, so a decoded grammar compares equal to the
//! one that was encoded.

use super::json::GrammarError;
use super::types::Grammar;

impl Grammar {
    /// Decode a grammar written by [`Grammar::to_binary`].
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        postcard::from_bytes(bytes).map_err(GrammarError::Binary)
    }

    /// Encode the grammar.
    pub fn to_binary(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("serialization should not fail")
    }
}
