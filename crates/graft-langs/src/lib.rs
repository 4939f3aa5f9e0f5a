//! Language extensions shipped with graft.
//!
//! Each language names the base grammar it extends, restates that grammar's
//! precedence levels, and carries the [`Extension`] that turns the base into it.

use std::sync::Arc;

use graft_compiler::{
    Assembled, Assembler, AssemblyConfig, BaseGrammar, Extension, PrecedenceTable,
};
use graft_core::Grammar;

pub mod builtin;
pub mod c;
#[cfg(feature = "lang-cpp")]
pub mod cpp;
pub mod scanner;

pub use builtin::*;

#[cfg(test)]
mod lib_tests;
#[cfg(all(test, feature = "lang-cpp"))]
mod cpp_tests;

/// User-facing language type.
pub type Lang = Arc<dyn LangImpl>;

pub trait LangImpl: Send + Sync {
    fn name(&self) -> &str;

    /// Name of the grammar this language extends.
    fn base_name(&self) -> &str;

    /// Named precedence levels of the base grammar.
    fn base_precedence(&self) -> &PrecedenceTable;

    fn extension(&self) -> &Extension;

    /// Wrap a base grammar read from `grammar.json` with its precedence names.
    fn base(&self, grammar: Grammar) -> BaseGrammar {
        BaseGrammar::new(grammar).with_precedence(self.base_precedence().clone())
    }

    fn assemble(
        &self,
        base: &BaseGrammar,
        config: AssemblyConfig,
    ) -> graft_compiler::Result<Assembled> {
        Assembler::new(base)
            .extension(self.extension())
            .config(config)
            .assemble()
    }
}

#[derive(Debug)]
pub struct LangInner {
    name: String,
    base_name: String,
    base_precedence: PrecedenceTable,
    extension: Extension,
}

impl LangInner {
    pub fn new(
        name: &str,
        base_name: &str,
        base_precedence: PrecedenceTable,
        extension: Extension,
    ) -> Self {
        Self {
            name: name.to_owned(),
            base_name: base_name.to_owned(),
            base_precedence,
            extension,
        }
    }
}

impl LangImpl for LangInner {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_name(&self) -> &str {
        &self.base_name
    }

    fn base_precedence(&self) -> &PrecedenceTable {
        &self.base_precedence
    }

    fn extension(&self) -> &Extension {
        &self.extension
    }
}
