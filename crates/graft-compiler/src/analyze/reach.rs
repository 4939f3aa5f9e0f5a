//! Reachability of rules from the start rule.
//!
//! Rule names are interned and the reference graph is an adjacency list indexed
//! by [`RuleId`], so cycles in the grammar need no special handling.

use indexmap::IndexSet;

use graft_core::{Grammar, Interner, RuleId};

use super::refs::grammar_level_names;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

struct RuleGraph {
    interner: Interner,
    edges: Vec<Vec<RuleId>>,
}

impl RuleGraph {
    fn build(grammar: &Grammar) -> Self {
        let mut interner = Interner::from_names(grammar.rules.keys().map(String::as_str));
        let mut edges = vec![Vec::new(); interner.len()];
        for (name, rule) in &grammar.rules {
            let Some(from) = interner.get(name) else {
                continue;
            };
            for target in rule.symbols() {
                // Externals get ids too but have no outgoing edges.
                let to = interner.intern(target);
                if to.index() >= edges.len() {
                    edges.resize(to.index() + 1, Vec::new());
                }
                edges[from.index()].push(to);
            }
        }
        Self { interner, edges }
    }

    fn reachable_from<'a>(&self, roots: impl IntoIterator<Item = &'a str>) -> Vec<bool> {
        let mut seen = vec![false; self.interner.len()];
        let mut stack: Vec<RuleId> = roots
            .into_iter()
            .filter_map(|name| self.interner.get(name))
            .collect();
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.index()], true) {
                continue;
            }
            if let Some(targets) = self.edges.get(id.index()) {
                stack.extend(targets.iter().copied().filter(|t| !seen[t.index()]));
            }
        }
        seen
    }
}

/// Rules not reachable from the start rule or any grammar-level reference, in
/// definition order.
pub fn unreachable_rules(grammar: &Grammar) -> Vec<&str> {
    let graph = RuleGraph::build(grammar);
    let roots = grammar
        .start_rule()
        .into_iter()
        .chain(grammar_level_names(grammar))
        .chain(grammar.external_names());
    let seen = graph.reachable_from(roots);

    grammar
        .rules
        .keys()
        .filter(|name| {
            graph
                .interner
                .get(name)
                .is_some_and(|id| !seen[id.index()])
        })
        .map(String::as_str)
        .collect()
}

/// Warn about unreachable rules among `candidates`.
///
/// Base rules the derived grammar stops using are expected, so callers pass only
/// the rules the extension added.
pub fn check_reachability(grammar: &Grammar, candidates: &IndexSet<String>, diag: &mut Diagnostics) {
    for name in unreachable_rules(grammar) {
        if !candidates.contains(name) {
            continue;
        }
        diag.report(DiagnosticKind::UnreachableRule)
            .message(name)
            .in_rule(name, &grammar.rules[name], 0)
            .hint("reference it from another rule or remove it")
            .emit();
    }
}
