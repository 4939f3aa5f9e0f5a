use graft_core::Rule;

use super::*;

fn if_statement() -> Rule {
    Rule::Seq(vec![Rule::string("if"), Rule::symbol("condtion")])
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::MissingStartRule).emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "grammar has no start rule"
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownPrecedence)
        .message("LAMBDA")
        .emit();

    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "precedence level `LAMBDA` is not declared"
    );
}

#[test]
fn render_rule_origin_with_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownRule)
        .in_rule("if_statement", &if_statement(), 2)
        .message("condtion")
        .hint("did you mean `condition`?")
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @r#"
    error: `condtion` is not defined
     --> rules.if_statement:1:11
      |
    1 | seq("if", $.condtion)
      |           ^^^^^^^^^^
      |
    help: did you mean `condition`?
    "#);
}

#[test]
fn render_rule_origin_with_fix() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownRule)
        .in_rule("if_statement", &if_statement(), 2)
        .message("condtion")
        .fix("use `condition`", "$.condition")
        .emit();

    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.fix().unwrap().description(), "use `condition`");

    let result = diagnostics.printer().render();
    assert!(result.starts_with("error: `condtion` is not defined"));
    assert!(result.contains("help: use `condition`"));
    assert!(result.contains(r#"seq("if", $.condition)"#));
}

#[test]
fn render_warning_on_whole_rule() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnreachableRule)
        .in_rule("if_statement", &if_statement(), 0)
        .message("if_statement")
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @r#"
    warning: `if_statement` is never used
     --> rules.if_statement:1:1
      |
    1 | seq("if", $.condtion)
      | ^^^^^^^^^^^^^^^^^^^^^
    "#);
}

#[test]
fn render_without_origin() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRule)
        .message("decltype")
        .hint("use `extend` or `replace` to change an existing rule")
        .emit();
    diagnostics
        .report(DiagnosticKind::InvalidConflict)
        .message("a conflict needs at least two rules, got `call`")
        .emit();

    let result = diagnostics.printer().render();
    insta::assert_snapshot!(result, @r"
    error: `decltype` is already defined
    help: use `extend` or `replace` to change an existing rule
    error: invalid conflict: a conflict needs at least two rules, got `call`
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownRule)
        .in_rule("if_statement", &if_statement(), 2)
        .message("condtion")
        .emit();

    let result = diagnostics.printer().colored(true).render();
    assert!(result.contains("condtion"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.printer().render().is_empty());
}

#[test]
fn origin_excerpt() {
    let origin = Origin::new("if_statement", &if_statement(), 1);
    assert_eq!(origin.rule(), "if_statement");
    assert_eq!(origin.excerpt(), r#""if""#);

    let out_of_range = Origin::new("if_statement", &if_statement(), 99);
    assert_eq!(out_of_range.excerpt(), r#"seq("if", $.condtion)"#);
}

#[test]
fn collection_counts() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnknownRule).emit();
    diagnostics.report(DiagnosticKind::UnreachableRule).emit();
    diagnostics.report(DiagnosticKind::NonUniformFields).emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 2);
    assert!(diagnostics.has_warnings());
    assert_eq!(
        diagnostics.kinds(),
        [
            DiagnosticKind::UnknownRule,
            DiagnosticKind::UnreachableRule,
            DiagnosticKind::NonUniformFields
        ]
    );
}

#[test]
fn display_includes_origin_and_hints() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidPattern)
        .in_rule("if_statement", &if_statement(), 1)
        .message("unclosed group")
        .hint("patterns use Rust regex syntax")
        .emit();

    let msg = diagnostics.iter().next().unwrap().to_string();
    insta::assert_snapshot!(msg, @"error: invalid pattern: unclosed group (in rules.if_statement) (hint: patterns use Rust regex syntax)");
}

#[test]
fn kind_message_rendering() {
    assert_eq!(DiagnosticKind::UnknownRule.message(None), "unknown rule");
    assert_eq!(
        DiagnosticKind::UnknownRule.message(Some("decltype")),
        "`decltype` is not defined"
    );
    assert_eq!(
        DiagnosticKind::InvalidPattern.custom_message(),
        "invalid pattern: {}"
    );
    assert!(DiagnosticKind::MissingStartRule < DiagnosticKind::UnreachableRule);
    assert_eq!(
        DiagnosticKind::PrecedenceMismatch.default_severity(),
        Severity::Warning
    );
    assert_eq!(
        DiagnosticKind::InvalidPrecedence.message(Some("HUGE")),
        "precedence level `HUGE` is out of range"
    );
}
