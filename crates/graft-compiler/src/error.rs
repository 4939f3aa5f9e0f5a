//! Errors raised by the individual registries.
//!
//! Inside an assembly these become diagnostics; they are public so the registries
//! can also be used on their own.

/// A rule name that the base grammar does not define.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{name}` is not defined")]
pub struct UnknownRuleError {
    pub name: String,
}

/// A rule name that is defined more than once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{name}` is already defined")]
pub struct DuplicateRuleError {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("precedence level `{name}` is not declared")]
pub struct UnknownPrecedenceError {
    pub name: String,
}

/// A precedence level declared twice with different values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("precedence level `{name}` is redefined as {new} (was {old})")]
pub struct PrecedenceRedefinedError {
    pub name: String,
    pub old: i32,
    pub new: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{name}` is already an external token")]
pub struct DuplicateExternalError {
    pub name: String,
}

/// A conflict entry with fewer than two distinct rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("a conflict needs at least two rules, got {}", format_names(.names))]
pub struct InvalidConflictError {
    pub names: Vec<String>,
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        return "none".to_string();
    }
    names
        .iter()
        .map(|n| format!("`{n}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
