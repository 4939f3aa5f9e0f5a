#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for graft.
//!
//! - [`Grammar`] and [`Rule`]: the tree-sitter grammar model, with `grammar.json`
//!   and binary encodings and a DSL-style printer
//! - [`Interner`]: rule name interning for the analysis passes
//! - [`Colors`]: ANSI palette shared by the CLI and the tracer

pub mod colors;
pub mod grammar;
mod interner;
pub mod utils;


pub use colors::Colors;
pub use grammar::{
    Grammar, GrammarError, Precedence, PrecedenceEntry, RenderedRule, Rule, is_hidden_name,
    render_rule,
};
pub use interner::{Interner, RuleId};
