//! Field uniformity lint for rules that use placeholder fields.

use graft_core::Grammar;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::normalize::{field_shape, uses_placeholders};

/// Warn when a rule written with placeholder fields still produces nodes whose
/// field set depends on the alternative taken.
pub fn check_field_shapes(grammar: &Grammar, diag: &mut Diagnostics) {
    for (name, rule) in &grammar.rules {
        if !uses_placeholders(rule) {
            continue;
        }
        let shape = field_shape(rule);
        if shape.is_uniform() {
            continue;
        }
        let fields = shape
            .sometimes
            .iter()
            .map(|f| format!("`{f}`"))
            .collect::<Vec<_>>()
            .join(", ");
        diag.report(DiagnosticKind::NonUniformFields)
            .message(fields)
            .in_rule(name, rule, 0)
            .hint("wrap optional children in `optional_field` so every node carries them")
            .emit();
    }
}
