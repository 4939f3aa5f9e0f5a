//! Identifier case conversion for generated scanner bindings.

/// Convert a snake_case rule name to PascalCase.
///
/// Words are separated by `_`, `-`, or `.`. Leading underscores of hidden rules
/// are dropped. Input that is already PascalCase is returned unchanged.
///
/// # Examples
/// ```
/// use graft_core::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("raw_string_literal"), "RawStringLiteral");
/// assert_eq!(to_pascal_case("_heredoc_body"), "HeredocBody");
/// assert_eq!(to_pascal_case("RawString"), "RawString");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-' | '.')
    }

    let has_separator = s.chars().any(is_separator);
    let has_lowercase = s.chars().any(|c| c.is_ascii_lowercase());
    let starts_uppercase = s.chars().next().is_some_and(|c| c.is_ascii_uppercase());

    if starts_uppercase && has_lowercase && !has_separator {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if is_separator(c) {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}

/// Convert a rule name to an upper-case C identifier.
///
/// # Examples
/// ```
/// use graft_core::utils::to_screaming_snake_case;
/// assert_eq!(to_screaming_snake_case("raw_string_literal"), "RAW_STRING_LITERAL");
/// assert_eq!(to_screaming_snake_case("RawString"), "RAW_STRING");
/// assert_eq!(to_screaming_snake_case("_heredoc-body"), "HEREDOC_BODY");
/// ```
pub fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if matches!(c, '_' | '-' | '.') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !result.ends_with('_') {
            result.push('_');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        result.push(c.to_ascii_uppercase());
    }
    if result.ends_with('_') {
        result.pop();
    }
    result
}
