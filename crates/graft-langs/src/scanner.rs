//! External scanners for tokens a context-free grammar cannot describe.

use std::ops::Range;

use graft_compiler::{NoMatch, Recognizer, ScanContext};

/// Longest delimiter a raw string literal may use.
pub const MAX_DELIMITER_LEN: usize = 16;

const PREFIXES: [&str; 5] = ["u8R\"", "LR\"", "uR\"", "UR\"", "R\""];

/// C++ raw string literals: `R"delim( ... )delim"`, optionally prefixed with
/// `L`, `u`, `U` or `u8`.
///
/// The body ends at the first `)` followed by the delimiter and a quote, so it may
/// contain quotes, backslashes and newlines. With a delimiter in the
/// [`ScanContext`] the literal is already open and only the body and the closing
/// sequence are consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawStringRecognizer;

impl Recognizer for RawStringRecognizer {
    fn recognize(
        &self,
        input: &str,
        position: usize,
        ctx: &ScanContext,
    ) -> Result<Range<usize>, NoMatch> {
        let rest = input.get(position..).ok_or(NoMatch)?;

        let (delimiter, body_start) = match ctx.delimiter.as_deref() {
            Some(delimiter) => (delimiter, 0),
            None => {
                let after_quote = PREFIXES
                    .iter()
                    .find_map(|prefix| rest.strip_prefix(prefix))
                    .ok_or(NoMatch)?;
                let open = after_quote
                    .char_indices()
                    .take(MAX_DELIMITER_LEN + 1)
                    .find_map(|(i, c)| (c == '(').then_some(i))
                    .ok_or(NoMatch)?;
                let delimiter = &after_quote[..open];
                if !is_valid_delimiter(delimiter) {
                    return Err(NoMatch);
                }
                (delimiter, rest.len() - after_quote.len() + open + 1)
            }
        };

        let closing = format!("){delimiter}\"");
        let body_len = rest[body_start..].find(&closing).ok_or(NoMatch)?;
        Ok(position..position + body_start + body_len + closing.len())
    }
}

pub fn is_valid_delimiter(delimiter: &str) -> bool {
    delimiter.len() <= MAX_DELIMITER_LEN
        && delimiter
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '(' | ')' | '\\'))
}
