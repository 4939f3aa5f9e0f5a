//! Link pass: every referenced name must be defined.

use graft_core::{Grammar, Rule};

use super::refs::{RefSite, references};
use super::utils::{find_similar, max_distance_for};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Check that the grammar has a start rule and that every name it mentions is a
/// rule or an external token.
pub fn link(grammar: &Grammar, diag: &mut Diagnostics) {
    if grammar.rules.is_empty() {
        diag.report(DiagnosticKind::MissingStartRule)
            .message(&grammar.name)
            .emit();
        return;
    }

    let mut candidates: Vec<&str> = grammar.rules.keys().map(String::as_str).collect();
    candidates.extend(grammar.external_names());

    for reference in references(grammar) {
        if grammar.defines(reference.name) {
            continue;
        }

        let max = max_distance_for(reference.name);
        let similar = find_similar(reference.name, &candidates, max);
        let mut builder = diag
            .report(DiagnosticKind::UnknownRule)
            .message(reference.name);
        builder = match (reference.site, similar) {
            (RefSite::Rule { rule, node }, Some(similar)) => builder
                .in_rule(rule, &grammar.rules[rule], node)
                .fix(format!("use `{similar}`"), Rule::symbol(similar).to_string()),
            (RefSite::Rule { rule, node }, None) => {
                builder.in_rule(rule, &grammar.rules[rule], node)
            }
            (site, similar) => {
                let builder = builder.hint(format!("referenced from `{site}`"));
                match similar {
                    Some(similar) => builder.hint(format!("did you mean `{similar}`?")),
                    None => builder,
                }
            }
        };
        builder.emit();
    }
}
