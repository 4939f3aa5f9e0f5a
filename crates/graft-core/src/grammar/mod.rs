//! Tree-sitter grammar model.
//!
//! Rules are written in tree-sitter's own vocabulary so that a grammar read from
//! `grammar.json`, extended, and written back is understood by `tree-sitter generate`.
//! The compact postcard form is used for caching assembled grammars.

mod binary;
mod json;
mod printer;
mod types;

#[cfg(test)]
mod json_tests;

pub use json::GrammarError;
pub use printer::{RenderedRule, render_rule};
pub use types::{Grammar, Precedence, PrecedenceEntry, Rule, is_hidden_name};
