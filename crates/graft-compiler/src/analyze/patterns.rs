//! Regex pattern validation.
//!
//! Grammar patterns use JavaScript regex syntax. They are translated to the
//! `regex-syntax` dialect first; the only differences that matter in practice are
//! `\uXXXX` escapes and the flags string.

use regex_automata::meta::{BuildError, Regex};
use regex_syntax::ParserBuilder;

use graft_core::{Grammar, Rule};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Report every pattern that does not parse.
pub fn check_patterns(grammar: &Grammar, diag: &mut Diagnostics) {
    for (name, rule) in &grammar.rules {
        rule.walk(&mut |node, r| {
            let Rule::Pattern { value, flags } = r else {
                return;
            };
            if let Err(err) = parse(value, flags.as_deref()) {
                diag.report(DiagnosticKind::InvalidPattern)
                    .message(format!("/{value}/"))
                    .in_rule(name, rule, node)
                    .hint(err)
                    .emit();
            }
        });
    }
}

fn parse(value: &str, flags: Option<&str>) -> Result<(), String> {
    let translated = translate(value, flags)?;
    ParserBuilder::new()
        .build()
        .parse(&translated)
        .map(|_| ())
        .map_err(|err| error_summary(&err.to_string()))
}

/// Compile a grammar pattern for matching.
pub fn compile(value: &str, flags: Option<&str>) -> Result<Regex, BuildError> {
    // Unsupported flags are reported by `check_patterns`; matching ignores them.
    let translated = translate(value, flags).unwrap_or_else(|_| value.to_owned());
    Regex::new(&translated)
}

/// Rewrite a JavaScript pattern in `regex-syntax` form.
pub fn translate(value: &str, flags: Option<&str>) -> Result<String, String> {
    let mut out = String::with_capacity(value.len() + 8);
    for flag in flags.unwrap_or_default().chars() {
        match flag {
            'i' => out.push_str("(?i)"),
            's' => out.push_str("(?s)"),
            'm' => out.push_str("(?m)"),
            // Unicode mode is always on.
            'u' | 'v' => {}
            other => return Err(format!("unsupported flag `{other}`")),
        }
    }

    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|&h| h != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                if hex.is_empty() || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return Err(format!("invalid unicode escape `\\u{hex}`"));
                }
                out.push_str("\\x{");
                out.push_str(&hex);
                out.push('}');
            }
            Some(escaped) => {
                out.push('\\');
                out.push(escaped);
            }
            None => out.push('\\'),
        }
    }
    Ok(out)
}

fn error_summary(message: &str) -> String {
    message
        .lines()
        .rev()
        .find(|line| line.starts_with("error:"))
        .map(|line| line.trim_start_matches("error:").trim().to_owned())
        .unwrap_or_else(|| message.lines().next().unwrap_or_default().to_owned())
}
