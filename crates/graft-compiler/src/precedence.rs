//! Named precedence levels.
//!
//! A table is built per assembly from the base grammar's levels and the
//! extension's declarations, then used to resolve every `Precedence::Name` in the
//! merged rules. Nothing here is global.

use indexmap::{IndexMap, IndexSet};

use graft_core::{Precedence, Rule};

use crate::analyze::utils::find_similar;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{PrecedenceRedefinedError, UnknownPrecedenceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    /// Runtime preference between complete parses instead of a table decision.
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelSource {
    #[default]
    Base,
    Extension,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceLevel {
    pub name: String,
    pub value: i32,
    pub associativity: Option<Associativity>,
    pub source: LevelSource,
}

/// Ordered map of named levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceTable {
    levels: IndexMap<String, PrecedenceLevel>,
}

impl PrecedenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of base levels, as in a grammar's `PREC` object.
    pub fn from_levels<'a>(levels: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let mut table = Self::new();
        for (name, value) in levels {
            table.levels.insert(
                name.to_owned(),
                PrecedenceLevel {
                    name: name.to_owned(),
                    value,
                    associativity: None,
                    source: LevelSource::Base,
                },
            );
        }
        table
    }

    /// Declare an extension level.
    ///
    /// Redeclaring a name with the same value is accepted and keeps the first
    /// declaration. Two names may share a value.
    pub fn declare(
        &mut self,
        name: &str,
        value: i32,
        associativity: Option<Associativity>,
    ) -> Result<(), PrecedenceRedefinedError> {
        if let Some(existing) = self.levels.get(name) {
            if existing.value != value {
                return Err(PrecedenceRedefinedError {
                    name: name.to_owned(),
                    old: existing.value,
                    new: value,
                });
            }
            return Ok(());
        }

        self.levels.insert(
            name.to_owned(),
            PrecedenceLevel {
                name: name.to_owned(),
                value,
                associativity,
                source: LevelSource::Extension,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PrecedenceLevel> {
        self.levels.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.contains_key(name)
    }

    pub fn resolve(&self, name: &str) -> Result<i32, UnknownPrecedenceError> {
        self.levels
            .get(name)
            .map(|level| level.value)
            .ok_or_else(|| UnknownPrecedenceError {
                name: name.to_owned(),
            })
    }

    /// Copy levels from `base` that this table does not have yet.
    pub fn extend_from(&mut self, base: &PrecedenceTable) -> Result<(), PrecedenceRedefinedError> {
        for level in base.levels.values() {
            match self.levels.get(&level.name) {
                Some(existing) if existing.value != level.value => {
                    return Err(PrecedenceRedefinedError {
                        name: level.name.clone(),
                        old: level.value,
                        new: existing.value,
                    });
                }
                Some(_) => {}
                None => {
                    self.levels.insert(level.name.clone(), level.clone());
                }
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrecedenceLevel> {
        self.levels.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Replace named precedences in `rule` with numbers from `table`.
///
/// Names listed in `symbolic` (the base grammar's `precedences` orderings) that the
/// table does not know stay named for tree-sitter to order. Anything else is
/// reported as `UnknownPrecedence` and left untouched.
///
/// Each use keeps its own kind: `prec.dynamic` stays dynamic and a static `prec`
/// stays static whatever the level was declared with. A plain `prec` on a left or
/// right level picks up the declared associativity. Uses that disagree with the
/// declaration are reported as `PrecedenceMismatch`.
pub(crate) fn resolve_rule(
    name: &str,
    rule: Rule,
    table: &PrecedenceTable,
    symbolic: &IndexSet<String>,
    diag: &mut Diagnostics,
) -> Rule {
    rule.walk(&mut |index, node| {
        let Some((usage, Precedence::Name(level))) = precedence_of(node) else {
            return;
        };
        if let Some(declared) = table.get(level) {
            let Some(associativity) = declared.associativity else {
                return;
            };
            if !usage.accepts(associativity) {
                diag.report(DiagnosticKind::PrecedenceMismatch)
                    .in_rule(name, &rule, index)
                    .message(level)
                    .hint(format!(
                        "`{level}` is declared {}, but used as {}",
                        associativity.describe(),
                        usage.describe()
                    ))
                    .emit();
            }
            return;
        }
        if symbolic.contains(level) {
            if usage == Usage::Dynamic {
                diag.report(DiagnosticKind::UnknownPrecedence)
                    .in_rule(name, &rule, index)
                    .message(level)
                    .hint("dynamic precedence needs a numeric level")
                    .emit();
            }
            return;
        }
        let candidates: Vec<&str> = table
            .names()
            .chain(symbolic.iter().map(String::as_str))
            .collect();
        let mut builder = diag
            .report(DiagnosticKind::UnknownPrecedence)
            .in_rule(name, &rule, index)
            .message(level);
        if let Some(similar) = find_similar(level, &candidates, 2) {
            let renamed = rename_level(node, similar);
            builder = builder.fix(format!("use `{similar}`"), renamed.to_string());
        }
        builder.emit();
    });

    rule.map(&mut |node| lower(node, table))
}

/// How a precedence node uses its level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Usage {
    Static,
    Left,
    Right,
    Dynamic,
}

impl Usage {
    fn accepts(self, associativity: Associativity) -> bool {
        matches!(
            (self, associativity),
            (Usage::Static | Usage::Left, Associativity::Left)
                | (Usage::Static | Usage::Right, Associativity::Right)
                | (Usage::Dynamic, Associativity::Dynamic)
        )
    }

    fn describe(self) -> &'static str {
        match self {
            Usage::Static => "`prec`",
            Usage::Left => "`prec.left`",
            Usage::Right => "`prec.right`",
            Usage::Dynamic => "`prec.dynamic`",
        }
    }
}

impl Associativity {
    fn describe(self) -> &'static str {
        match self {
            Associativity::Left => "left-associative",
            Associativity::Right => "right-associative",
            Associativity::Dynamic => "dynamic",
        }
    }
}

fn precedence_of(rule: &Rule) -> Option<(Usage, &Precedence)> {
    match rule {
        Rule::Prec { value, .. } => Some((Usage::Static, value)),
        Rule::PrecLeft { value, .. } => Some((Usage::Left, value)),
        Rule::PrecRight { value, .. } => Some((Usage::Right, value)),
        Rule::PrecDynamic { value, .. } => Some((Usage::Dynamic, value)),
        _ => None,
    }
}

/// `rule` with its precedence name replaced by `level`.
fn rename_level(rule: &Rule, level: &str) -> Rule {
    let mut renamed = rule.clone();
    if let Rule::Prec { value, .. }
    | Rule::PrecLeft { value, .. }
    | Rule::PrecRight { value, .. }
    | Rule::PrecDynamic { value, .. } = &mut renamed
    {
        *value = Precedence::Name(level.to_owned());
    }
    renamed
}

fn level_of<'t>(table: &'t PrecedenceTable, value: &Precedence) -> Option<&'t PrecedenceLevel> {
    match value {
        Precedence::Name(name) => table.get(name),
        Precedence::Integer(_) => None,
    }
}

fn numeric(table: &PrecedenceTable, value: Precedence) -> Precedence {
    match level_of(table, &value) {
        Some(level) => Precedence::Integer(level.value),
        None => value,
    }
}

fn lower(rule: Rule, table: &PrecedenceTable) -> Rule {
    match rule {
        Rule::Prec { value, content } => match level_of(table, &value) {
            Some(level) => {
                let value = Precedence::Integer(level.value);
                match level.associativity {
                    Some(Associativity::Left) => Rule::PrecLeft { value, content },
                    Some(Associativity::Right) => Rule::PrecRight { value, content },
                    None | Some(Associativity::Dynamic) => Rule::Prec { value, content },
                }
            }
            None => Rule::Prec { value, content },
        },
        Rule::PrecLeft { value, content } => Rule::PrecLeft {
            value: numeric(table, value),
            content,
        },
        Rule::PrecRight { value, content } => Rule::PrecRight {
            value: numeric(table, value),
            content,
        },
        Rule::PrecDynamic { value, content } => Rule::PrecDynamic {
            value: numeric(table, value),
            content,
        },
        other => other,
    }
}
