//! Extension definitions and the merge onto a base grammar.
//!
//! An [`Extension`] is plain data plus override functions. Overrides receive the
//! base definition of the rule and return its replacement, so "the original rule
//! plus one more alternative" is written as a function of the original.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use graft_core::Rule;

use crate::analyze::utils::{find_similar, max_distance_for};
use crate::base::BaseGrammar;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::externals::{ExternalTokens, Recognizer};
use crate::precedence::Associativity;
use crate::trace::Tracer;

type OverrideFn = Box<dyn Fn(Rule) -> Rule + Send + Sync>;

enum Change {
    Extend(OverrideFn),
    Replace(Rule),
    /// Replace when the base has the rule, add otherwise.
    Define(Rule),
}

/// A precedence level declared by an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDecl {
    Absolute {
        name: String,
        value: i32,
        associativity: Option<Associativity>,
    },
    /// `name = of + offset`, resolved once the base levels are known.
    Relative {
        name: String,
        of: String,
        offset: i32,
        associativity: Option<Associativity>,
    },
}

impl LevelDecl {
    pub fn name(&self) -> &str {
        match self {
            Self::Absolute { name, .. } | Self::Relative { name, .. } => name,
        }
    }
}

/// Everything a derived grammar changes relative to its base.
///
/// Built once, for example in a `LazyLock`, and applied by the assembler.
/// Nothing is validated while building; all problems are reported together when
/// the extension is assembled.
pub struct Extension {
    name: String,
    overrides: Vec<(String, Change)>,
    additions: Vec<(String, Rule)>,
    levels: Vec<LevelDecl>,
    conflicts: Vec<Vec<String>>,
    inline: Vec<String>,
    externals: Vec<String>,
    recognizers: ExternalTokens,
    supertypes: Vec<String>,
    extras: Vec<Rule>,
    word: Option<String>,
}

impl Extension {
    /// Extension producing a grammar called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: Vec::new(),
            additions: Vec::new(),
            levels: Vec::new(),
            conflicts: Vec::new(),
            inline: Vec::new(),
            externals: Vec::new(),
            recognizers: ExternalTokens::new(),
            supertypes: Vec::new(),
            extras: Vec::new(),
            word: None,
        }
    }

    /// Override `name` with a function of its base definition.
    pub fn extend(
        mut self,
        name: &str,
        f: impl Fn(Rule) -> Rule + Send + Sync + 'static,
    ) -> Self {
        self.overrides
            .push((name.to_owned(), Change::Extend(Box::new(f))));
        self
    }

    /// Override `name` without looking at its base definition.
    pub fn replace(mut self, name: &str, rule: impl Into<Rule>) -> Self {
        self.overrides
            .push((name.to_owned(), Change::Replace(rule.into())));
        self
    }

    /// Define `name` the way a grammar file does: it replaces a base rule of that
    /// name, or is added when the base has none.
    pub fn define(mut self, name: &str, rule: impl Into<Rule>) -> Self {
        self.overrides
            .push((name.to_owned(), Change::Define(rule.into())));
        self
    }

    /// Add a rule the base grammar does not have.
    pub fn add(mut self, name: &str, rule: impl Into<Rule>) -> Self {
        self.additions.push((name.to_owned(), rule.into()));
        self
    }

    pub fn precedence(
        mut self,
        name: &str,
        value: i32,
        associativity: Option<Associativity>,
    ) -> Self {
        self.levels.push(LevelDecl::Absolute {
            name: name.to_owned(),
            value,
            associativity,
        });
        self
    }

    /// Declare `name` one step relative to an existing level, e.g. `NEW = CALL + 1`.
    pub fn precedence_relative(mut self, name: &str, of: &str, offset: i32) -> Self {
        self.levels.push(LevelDecl::Relative {
            name: name.to_owned(),
            of: of.to_owned(),
            offset,
            associativity: None,
        });
        self
    }

    pub fn conflict<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.conflicts
            .push(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn inline(mut self, name: &str) -> Self {
        self.inline.push(name.to_owned());
        self
    }

    /// Append an external token; its recognizer is bound by the host.
    pub fn external(mut self, name: &str) -> Self {
        self.externals.push(name.to_owned());
        self
    }

    /// Append an external token together with its recognizer.
    pub fn external_with(mut self, name: &str, recognizer: impl Recognizer + 'static) -> Self {
        self.externals.push(name.to_owned());
        // Duplicates are reported at assembly from `externals`.
        let _ = self.recognizers.register(name, recognizer);
        self
    }

    pub fn supertype(mut self, name: &str) -> Self {
        self.supertypes.push(name.to_owned());
        self
    }

    pub fn extra(mut self, rule: impl Into<Rule>) -> Self {
        self.extras.push(rule.into());
        self
    }

    pub fn word(mut self, name: &str) -> Self {
        self.word = Some(name.to_owned());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of overridden and defined rules, in declaration order.
    pub fn overridden(&self) -> impl Iterator<Item = &str> {
        self.overrides.iter().map(|(name, _)| name.as_str())
    }

    /// Added rule names, in declaration order.
    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.additions.iter().map(|(name, _)| name.as_str())
    }

    pub fn levels(&self) -> &[LevelDecl] {
        &self.levels
    }

    pub fn conflicts(&self) -> &[Vec<String>] {
        &self.conflicts
    }

    pub fn inline_rules(&self) -> &[String] {
        &self.inline
    }

    pub fn externals(&self) -> &[String] {
        &self.externals
    }

    /// Recognizers registered with [`Extension::external_with`].
    pub fn recognizers(&self) -> &ExternalTokens {
        &self.recognizers
    }

    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn extras(&self) -> &[Rule] {
        &self.extras
    }

    pub fn word_rule(&self) -> Option<&str> {
        self.word.as_deref()
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name)
            .field("overrides", &self.overridden().collect::<Vec<_>>())
            .field("additions", &self.added().collect::<Vec<_>>())
            .field("levels", &self.levels)
            .field("conflicts", &self.conflicts)
            .field("externals", &self.externals)
            .finish_non_exhaustive()
    }
}

/// Apply overrides and additions to the base rules.
///
/// Overrides run in declaration order. The result keeps the base order, with
/// overridden rules in place, then rules defined without a base counterpart,
/// then additions, each in declaration order.
pub fn merge(
    base: &BaseGrammar,
    extension: &Extension,
    diag: &mut Diagnostics,
    tracer: &mut impl Tracer,
) -> IndexMap<String, Rule> {
    let mut rules = base.rules().clone();
    let mut claimed: HashSet<&str> = HashSet::new();

    for (name, change) in &extension.overrides {
        if !claimed.insert(name) {
            diag.report(DiagnosticKind::DuplicateRule)
                .message(name)
                .hint("each rule can be overridden once")
                .emit();
            continue;
        }

        let original = match (base.get_rule(name), change) {
            (Ok(rule), _) => rule,
            (Err(_), Change::Define(rule)) => {
                tracer.trace_rule_added(name, rule);
                rules.insert(name.clone(), rule.clone());
                continue;
            }
            (Err(err), _) => {
                report_unknown(base, &err.name, diag);
                continue;
            }
        };

        let rule = match change {
            Change::Extend(f) => f(original.clone()),
            Change::Replace(rule) | Change::Define(rule) => rule.clone(),
        };
        tracer.trace_override_applied(name, &rule);
        rules.insert(name.clone(), rule);
    }

    for (name, rule) in &extension.additions {
        if base.defines(name) {
            diag.report(DiagnosticKind::DuplicateRule)
                .message(name)
                .hint("use `extend` or `replace` to change an existing rule")
                .emit();
            continue;
        }
        if !claimed.insert(name) {
            diag.report(DiagnosticKind::DuplicateRule)
                .message(name)
                .emit();
            continue;
        }
        tracer.trace_rule_added(name, rule);
        rules.insert(name.clone(), rule.clone());
    }

    rules
}

fn report_unknown(base: &BaseGrammar, name: &str, diag: &mut Diagnostics) {
    let candidates: Vec<&str> = base.rule_names().collect();
    let mut builder = diag
        .report(DiagnosticKind::UnknownRule)
        .message(name)
        .hint("only rules of the base grammar can be overridden; use `add` for new rules");
    if let Some(similar) = find_similar(name, &candidates, max_distance_for(name)) {
        builder = builder.hint(format!("did you mean `{similar}`?"));
    }
    builder.emit();
}
