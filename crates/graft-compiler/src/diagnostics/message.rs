use std::ops::Range;

use graft_core::{Rule, render_rule};

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Structural problems come first because nothing downstream is meaningful
/// without a start rule; lints come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    MissingStartRule,

    // The extension names something the grammar does not have
    UnknownRule,
    UnknownPrecedence,

    // The extension defines something twice
    DuplicateRule,
    PrecedenceRedefined,
    DuplicateExternal,

    // Malformed declarations
    InvalidConflict,
    InvalidPattern,
    InvalidPrecedence,

    // Lints
    PrecedenceMismatch,
    NonUniformFields,
    UnreachableRule,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::PrecedenceMismatch | Self::NonUniformFields | Self::UnreachableRule => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::MissingStartRule => "grammar has no start rule",
            Self::UnknownRule => "unknown rule",
            Self::UnknownPrecedence => "unknown precedence level",
            Self::DuplicateRule => "duplicate rule",
            Self::PrecedenceRedefined => "precedence level redefined",
            Self::DuplicateExternal => "duplicate external token",
            Self::InvalidConflict => "invalid conflict",
            Self::InvalidPattern => "invalid pattern",
            Self::InvalidPrecedence => "invalid precedence level",
            Self::PrecedenceMismatch => "precedence level used against its declaration",
            Self::NonUniformFields => "fields differ between alternatives",
            Self::UnreachableRule => "unreachable rule",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::MissingStartRule => "grammar `{}` has no rules".to_string(),
            Self::UnknownRule => "`{}` is not defined".to_string(),
            Self::UnknownPrecedence => "precedence level `{}` is not declared".to_string(),
            Self::DuplicateRule => "`{}` is already defined".to_string(),
            Self::PrecedenceRedefined => {
                "precedence level `{}` is redefined with a different value".to_string()
            }
            Self::DuplicateExternal => "`{}` is already an external token".to_string(),
            Self::InvalidPrecedence => "precedence level `{}` is out of range".to_string(),
            Self::PrecedenceMismatch => {
                "precedence level `{}` is used against its declaration".to_string()
            }
            Self::NonUniformFields => "fields {} are missing from some alternatives".to_string(),
            Self::UnreachableRule => "`{}` is never used".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Where inside the grammar a diagnostic points.
///
/// The rule is printed once when the diagnostic is reported, so the collection
/// can be rendered after the rule map it came from is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub(crate) rule: String,
    pub(crate) text: String,
    pub(crate) span: Range<usize>,
}

impl Origin {
    /// Point at the node with pre-order index `node` inside `rule`.
    pub fn new(name: impl Into<String>, rule: &Rule, node: usize) -> Self {
        let rendered = render_rule(rule);
        let span = rendered
            .span(node)
            .unwrap_or(0..rendered.text.len());
        Self {
            rule: name.into(),
            text: rendered.text,
            span,
        }
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The underlined part of the printed rule.
    pub fn excerpt(&self) -> &str {
        &self.text[self.span.clone()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    pub(crate) origin: Option<Origin>,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            origin: None,
            message: kind.fallback_message().to_string(),
            fix: None,
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(origin) = &self.origin {
            write!(f, " (in rules.{})", origin.rule)?;
        }
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
