//! Grammar composition: build a derived tree-sitter grammar on top of a base one.
//!
//! - `base` - read-only view of the base grammar
//! - `merge` - extension definitions and the override/addition merge
//! - `precedence`, `conflicts`, `externals` - the registries an extension declares into
//! - `normalize` - placeholder fields that keep node shapes uniform
//! - `assemble` - the pipeline that produces the finished grammar
//! - `analyze` - link, reachability, field shape and pattern passes
//! - `diagnostics` - error reporting
//! - `engine` - contract with the parse table generator

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod assemble;
pub mod base;
pub mod conflicts;
pub mod diagnostics;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod externals;
pub mod merge;
pub mod normalize;
pub mod precedence;
pub mod trace;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

#[cfg(test)]
mod assemble_tests;
#[cfg(test)]
mod conflicts_tests;
#[cfg(test)]
mod dsl_tests;

pub use assemble::{Assembled, Assembler, AssemblyConfig, assemble};
pub use base::BaseGrammar;
pub use conflicts::ConflictSet;
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use engine::{EngineError, ParseTableBuilder, parse_generate_output};
pub use externals::{
    BindError, ExternalBinding, ExternalTokens, NoMatch, Recognizer, ScanContext, fingerprint,
};
pub use graft_core::{Grammar, GrammarError, Precedence, Rule};
pub use merge::{Extension, LevelDecl};
pub use normalize::{optional_field, reserved_field};
pub use precedence::{Associativity, PrecedenceLevel, PrecedenceTable};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};

/// Errors that can occur while assembling or building a grammar.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grammar assembly failed with {} errors", .0.error_count())]
    Assembly(Diagnostics),

    /// Warnings were reported and the assembly was configured as strict.
    #[error("grammar assembly produced {} warnings in strict mode", .0.warning_count())]
    StrictWarnings(Diagnostics),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl Error {
    /// Diagnostics carried by assembly failures.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Assembly(d) | Self::StrictWarnings(d) => Some(d),
            _ => None,
        }
    }
}

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, Error>;
