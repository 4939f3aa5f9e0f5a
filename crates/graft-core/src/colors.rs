//! ANSI color codes for terminal output.
//!
//! - Blue: rule names
//! - Green: literals and patterns
//! - Red / yellow: errors and warnings in trace output
//! - Dim: structure and metadata

/// ANSI color palette for CLI and trace output.
///
/// Uses only standard 16-color ANSI codes, so it reads on light and dark themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub yellow: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        red: "\x1b[31m",
        yellow: "\x1b[33m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        red: "",
        yellow: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Wrap a rule name in the rule color.
    pub fn rule(&self, name: &str) -> String {
        format!("{}{name}{}", self.blue, self.reset)
    }
}
