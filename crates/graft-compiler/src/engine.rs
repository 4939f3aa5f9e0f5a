//! Contract with the parse table generator.
//!
//! The generator is a black box that accepts a finished grammar. The only
//! failure graft interprets is an ambiguity nobody declared; everything else is
//! passed through as the generator reported it.

use graft_core::Grammar;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The generator found a conflict that no conflict entry covers.
    #[error("undeclared ambiguity between {}: {message}", format_rules(.rules))]
    UndeclaredAmbiguity { rules: Vec<String>, message: String },

    #[error("{message}")]
    Rejected { message: String },
}

fn format_rules(rules: &[String]) -> String {
    if rules.is_empty() {
        return "unknown rules".to_string();
    }
    rules
        .iter()
        .map(|r| format!("`{r}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Turns a grammar into parse tables.
pub trait ParseTableBuilder {
    type Output;

    fn build(&self, grammar: &Grammar) -> Result<Self::Output, EngineError>;
}

/// Classify failure output of `tree-sitter generate`.
///
/// Returns `None` when the output does not look like a failure.
pub fn parse_generate_output(output: &str) -> Option<EngineError> {
    let output = output.trim();
    if output.is_empty() {
        return None;
    }

    if !output.contains("Unresolved conflict") {
        return Some(EngineError::Rejected {
            message: output.to_owned(),
        });
    }

    let rules = output
        .lines()
        .skip_while(|line| !line.contains("Add a conflict for these rules:"))
        .find_map(|line| {
            let names = backticked(line);
            (!names.is_empty()).then_some(names)
        })
        .unwrap_or_default();

    Some(EngineError::UndeclaredAmbiguity {
        rules,
        message: output.to_owned(),
    })
}

fn backticked(line: &str) -> Vec<String> {
    line.split('`')
        .skip(1)
        .step_by(2)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
