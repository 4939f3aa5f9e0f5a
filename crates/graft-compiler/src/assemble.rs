//! The assembly pipeline.
//!
//! Precedence levels are declared first, then the rules are merged and their
//! named precedences resolved, then conflicts, externals and the remaining
//! grammar metadata are attached. Analysis passes run on the finished grammar.
//! Any error discards the result; warnings travel with it.

use indexmap::{IndexMap, IndexSet};

use graft_core::{Grammar, Rule};

use crate::analyze;
use crate::base::BaseGrammar;
use crate::conflicts::ConflictSet;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::externals::ExternalTokens;
use crate::merge::{Extension, LevelDecl, merge};
use crate::precedence::{PrecedenceTable, resolve_rule};
use crate::trace::{NoopTracer, Tracer};
use crate::{Error, Result};

/// Which optional passes run, and whether warnings fail the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyConfig {
    pub lint_unreachable: bool,
    pub lint_field_shapes: bool,
    pub validate_patterns: bool,
    pub strict: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            lint_unreachable: true,
            lint_field_shapes: true,
            validate_patterns: true,
            strict: false,
        }
    }
}

impl AssemblyConfig {
    pub fn with_lint_unreachable(mut self, value: bool) -> Self {
        self.lint_unreachable = value;
        self
    }

    pub fn with_lint_field_shapes(mut self, value: bool) -> Self {
        self.lint_field_shapes = value;
        self
    }

    pub fn with_validate_patterns(mut self, value: bool) -> Self {
        self.validate_patterns = value;
        self
    }

    pub fn with_strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }
}

/// A derived grammar together with the warnings reported while building it.
#[derive(Debug, Clone)]
pub struct Assembled {
    grammar: Grammar,
    precedence: PrecedenceTable,
    diagnostics: Diagnostics,
}

impl Assembled {
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn into_grammar(self) -> Grammar {
        self.grammar
    }

    /// Levels the rules were resolved against, base and extension.
    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

pub struct Assembler<'a, T: Tracer = NoopTracer> {
    base: &'a BaseGrammar,
    extension: Option<&'a Extension>,
    config: AssemblyConfig,
    tracer: T,
}

impl<'a> Assembler<'a> {
    pub fn new(base: &'a BaseGrammar) -> Self {
        Self {
            base,
            extension: None,
            config: AssemblyConfig::default(),
            tracer: NoopTracer,
        }
    }
}

impl<'a, T: Tracer> Assembler<'a, T> {
    pub fn extension(mut self, extension: &'a Extension) -> Self {
        self.extension = Some(extension);
        self
    }

    pub fn config(mut self, config: AssemblyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tracer<U: Tracer>(self, tracer: U) -> Assembler<'a, U> {
        Assembler {
            base: self.base,
            extension: self.extension,
            config: self.config,
            tracer,
        }
    }

    /// Build the derived grammar.
    ///
    /// Without an extension the result is the base grammar run through the same
    /// passes.
    pub fn assemble(mut self) -> Result<Assembled> {
        let base = self.base;
        let empty;
        let extension = match self.extension {
            Some(extension) => extension,
            None => {
                empty = Extension::new(base.name());
                &empty
            }
        };
        let mut diag = Diagnostics::new();

        self.tracer.trace_base_loaded(base.name(), base.rules().len());

        let table = self.declare_levels(extension, &mut diag);

        let merged = merge(base, extension, &mut diag, &mut self.tracer);
        let symbolic = base.symbolic_precedences();
        let rules: IndexMap<String, Rule> = merged
            .into_iter()
            .map(|(name, rule)| {
                let rule = resolve_rule(&name, rule, &table, &symbolic, &mut diag);
                (name, rule)
            })
            .collect();

        let conflicts = self.merge_conflicts(extension, &mut diag);
        let externals = self.merge_externals(extension, &mut diag);

        let grammar = Grammar {
            name: extension.name().to_owned(),
            rules,
            extras: concat(&base.grammar().extras, extension.extras()),
            precedences: base.grammar().precedences.clone(),
            conflicts: conflicts.into_vec(),
            externals,
            inline: union(base.original_inline(), extension.inline_rules()),
            supertypes: union(&base.grammar().supertypes, extension.supertypes()),
            word: extension
                .word_rule()
                .map(str::to_owned)
                .or_else(|| base.grammar().word.clone()),
            reserved: base.grammar().reserved.clone(),
            inherits: match self.extension {
                Some(_) => Some(base.name().to_owned()),
                None => base.grammar().inherits.clone(),
            },
        };

        self.run_passes(&grammar, &mut diag);

        if diag.has_errors() {
            return Err(Error::Assembly(diag));
        }
        if self.config.strict && diag.has_warnings() {
            return Err(Error::StrictWarnings(diag));
        }

        Ok(Assembled {
            grammar,
            precedence: table,
            diagnostics: diag,
        })
    }

    fn declare_levels(&mut self, extension: &Extension, diag: &mut Diagnostics) -> PrecedenceTable {
        let mut table = self.base.original_precedence_table().clone();
        for level in table.iter() {
            self.tracer.trace_precedence_declared(level);
        }

        for decl in extension.levels() {
            let (value, associativity) = match decl {
                LevelDecl::Absolute {
                    value,
                    associativity,
                    ..
                } => (*value, *associativity),
                LevelDecl::Relative {
                    name,
                    of,
                    offset,
                    associativity,
                } => match table.resolve(of) {
                    Ok(value) => match value.checked_add(*offset) {
                        Some(value) => (value, *associativity),
                        None => {
                            diag.report(DiagnosticKind::InvalidPrecedence)
                                .message(name)
                                .hint(format!("`{of}` ({value}) + {offset} does not fit in i32"))
                                .emit();
                            continue;
                        }
                    },
                    Err(err) => {
                        diag.report(DiagnosticKind::UnknownPrecedence)
                            .message(&err.name)
                            .hint(format!("`{name}` is declared relative to it"))
                            .emit();
                        continue;
                    }
                },
            };

            match table.declare(decl.name(), value, associativity) {
                Ok(()) => {
                    if let Some(level) = table.get(decl.name()) {
                        self.tracer.trace_precedence_declared(level);
                    }
                }
                Err(err) => diag
                    .report(DiagnosticKind::PrecedenceRedefined)
                    .message(&err.name)
                    .hint(format!("declared as {}, redeclared as {}", err.old, err.new))
                    .emit(),
            }
        }
        table
    }

    fn merge_conflicts(&mut self, extension: &Extension, diag: &mut Diagnostics) -> ConflictSet {
        let mut conflicts = self.base.original_conflicts();
        let base_count = conflicts.len();

        let mut declared = ConflictSet::new();
        for entry in extension.conflicts() {
            if let Err(err) = declared.declare(entry.iter().map(String::as_str)) {
                let names = err
                    .names
                    .iter()
                    .map(|n| format!("`{n}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                diag.report(DiagnosticKind::InvalidConflict)
                    .message(if names.is_empty() { "[]".to_owned() } else { names })
                    .hint("a conflict names at least two rules")
                    .emit();
            }
        }

        conflicts.union(&declared);
        self.tracer.trace_conflicts_merged(base_count, conflicts.len());
        conflicts
    }

    fn merge_externals(&mut self, extension: &Extension, diag: &mut Diagnostics) -> Vec<Rule> {
        let base = self.base;
        let mut tokens = ExternalTokens::new();
        for name in base.original_externals() {
            // Repeats inside the base grammar are its own business.
            let _ = tokens.declare(name);
        }

        let mut externals = base.grammar().externals.clone();
        for name in extension.externals() {
            match tokens.declare(name) {
                Ok(()) => {
                    self.tracer.trace_external_declared(name, externals.len());
                    externals.push(Rule::symbol(name.as_str()));
                }
                Err(err) => {
                    let mut builder = diag
                        .report(DiagnosticKind::DuplicateExternal)
                        .message(&err.name);
                    if base.original_externals().any(|n| n == err.name) {
                        builder = builder.hint("the base grammar already declares it");
                    }
                    builder.emit();
                }
            }
        }
        externals
    }

    fn run_passes(&mut self, grammar: &Grammar, diag: &mut Diagnostics) {
        self.pass("link", diag, |d| analyze::link(grammar, d));

        if self.config.validate_patterns {
            self.pass("patterns", diag, |d| analyze::check_patterns(grammar, d));
        }
        if self.config.lint_unreachable {
            let added: IndexSet<String> = grammar
                .rules
                .keys()
                .filter(|name| !self.base.defines(name))
                .cloned()
                .collect();
            self.pass("reach", diag, |d| {
                analyze::check_reachability(grammar, &added, d)
            });
        }
        if self.config.lint_field_shapes {
            self.pass("shape", diag, |d| analyze::check_field_shapes(grammar, d));
        }
    }

    fn pass(&mut self, name: &str, diag: &mut Diagnostics, f: impl FnOnce(&mut Diagnostics)) {
        let errors = diag.error_count();
        let warnings = diag.warning_count();
        f(&mut *diag);
        self.tracer.trace_pass_finished(
            name,
            diag.error_count() - errors,
            diag.warning_count() - warnings,
        );
    }
}

/// Assemble `extension` on top of `base` with the default configuration.
pub fn assemble(base: &BaseGrammar, extension: &Extension) -> Result<Assembled> {
    Assembler::new(base).extension(extension).assemble()
}

fn concat(base: &[Rule], extra: &[Rule]) -> Vec<Rule> {
    let mut out = base.to_vec();
    for rule in extra {
        if !out.contains(rule) {
            out.push(rule.clone());
        }
    }
    out
}

fn union(base: &[String], extra: &[String]) -> Vec<String> {
    let mut out: IndexSet<String> = base.iter().cloned().collect();
    out.extend(extra.iter().cloned());
    out.into_iter().collect()
}
