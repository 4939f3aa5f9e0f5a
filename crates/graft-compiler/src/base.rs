//! Read-only view of the grammar being extended.

use indexmap::{IndexMap, IndexSet};

use graft_core::{Grammar, GrammarError, Rule};

use crate::conflicts::ConflictSet;
use crate::error::UnknownRuleError;
use crate::precedence::PrecedenceTable;

/// A base grammar with its named precedence levels.
///
/// `grammar.json` stores precedences already resolved to numbers, so the level
/// names the base was written with (its `PREC` object) are supplied separately
/// with [`BaseGrammar::with_precedence`].
#[derive(Debug, Clone)]
pub struct BaseGrammar {
    grammar: Grammar,
    precedence: PrecedenceTable,
}

impl BaseGrammar {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            precedence: PrecedenceTable::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        Grammar::from_json(json).map(Self::new)
    }

    pub fn with_precedence(mut self, table: PrecedenceTable) -> Self {
        self.precedence = table;
        self
    }

    pub fn name(&self) -> &str {
        &self.grammar.name
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn rules(&self) -> &IndexMap<String, Rule> {
        &self.grammar.rules
    }

    pub fn start_rule(&self) -> Option<&str> {
        self.grammar.start_rule()
    }

    /// The base definition of `name`, as handed to overrides.
    pub fn get_rule(&self, name: &str) -> Result<&Rule, UnknownRuleError> {
        self.grammar.rules.get(name).ok_or_else(|| UnknownRuleError {
            name: name.to_owned(),
        })
    }

    /// Whether `name` is a rule of the base grammar.
    pub fn contains(&self, name: &str) -> bool {
        self.grammar.rules.contains_key(name)
    }

    /// Whether `name` is a rule or an external token of the base grammar.
    pub fn defines(&self, name: &str) -> bool {
        self.grammar.defines(name)
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.grammar.rules.keys().map(String::as_str)
    }

    pub fn original_conflicts(&self) -> ConflictSet {
        ConflictSet::from_entries(self.grammar.conflicts.iter().cloned())
    }

    pub fn original_precedence_table(&self) -> &PrecedenceTable {
        &self.precedence
    }

    pub fn original_inline(&self) -> &[String] {
        &self.grammar.inline
    }

    pub fn original_externals(&self) -> impl Iterator<Item = &str> {
        self.grammar.external_names()
    }

    /// Level names used by the base grammar's `precedences` orderings.
    pub fn symbolic_precedences(&self) -> IndexSet<String> {
        self.grammar
            .ordered_precedence_names()
            .map(str::to_owned)
            .collect()
    }
}
