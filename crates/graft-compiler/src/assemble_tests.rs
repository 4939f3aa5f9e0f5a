use graft_core::{Grammar, Precedence, Rule};

use crate::assemble::{Assembler, AssemblyConfig, assemble};
use crate::base::BaseGrammar;
use crate::diagnostics::DiagnosticKind;
use crate::dsl::*;
use crate::merge::Extension;
use crate::test_utils::{grammar, mini_c};
use crate::trace::{PrintTracer, Verbosity};
use crate::{Error, choice, seq};

fn decltype_extension() -> Extension {
    Extension::new("mini_cpp")
        .precedence_relative("NEW", "CALL", 1)
        .extend("type_specifier", |original| choice![original, sym("decltype")])
        .add(
            "decltype",
            prec_level("NEW", seq!["decltype", "(", field("argument", sym("expression")), ")"]),
        )
        .conflict(["type_specifier", "decltype"])
}

#[test]
fn derived_grammar_metadata() {
    let base = mini_c();
    let assembled = assemble(&base, &decltype_extension()).unwrap();
    let grammar = assembled.grammar();

    assert_eq!(grammar.name, "mini_cpp");
    assert_eq!(grammar.inherits.as_deref(), Some("mini_c"));
    assert_eq!(grammar.start_rule(), Some("translation_unit"));
    assert_eq!(grammar.word.as_deref(), Some("identifier"));
    assert_eq!(
        grammar.conflicts,
        [
            vec!["type_specifier", "expression"],
            vec!["type_specifier", "decltype"]
        ]
    );
    assert!(assembled.diagnostics().is_empty());
}

#[test]
fn named_precedences_are_resolved() {
    let base = mini_c();
    let assembled = assemble(&base, &decltype_extension()).unwrap();

    assert_eq!(assembled.precedence().resolve("NEW"), Ok(15));
    let Rule::Prec { value, .. } = &assembled.grammar().rules["decltype"] else {
        panic!("expected prec");
    };
    assert_eq!(*value, Precedence::Integer(15));
}

#[test]
fn errors_are_collected_together() {
    let base = mini_c();
    let extension = Extension::new("broken")
        .precedence_relative("NEW", "CALLL", 1)
        .replace("type_specifer", "x")
        .add("lambda", prec_level("LAMBDA", "[]"))
        .conflict(["call"])
        .external("heredoc")
        .external("heredoc");

    let err = assemble(&base, &extension).unwrap_err();

    insta::assert_snapshot!(err, @"grammar assembly failed with 5 errors");
    let diagnostics = err.diagnostics().unwrap();
    assert_eq!(
        diagnostics.kinds(),
        [
            DiagnosticKind::UnknownPrecedence,
            DiagnosticKind::UnknownRule,
            DiagnosticKind::UnknownPrecedence,
            DiagnosticKind::InvalidConflict,
            DiagnosticKind::DuplicateExternal,
            DiagnosticKind::UnreachableRule,
        ]
    );
    let messages: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(messages.join("\n"), @r"
    error: precedence level `CALLL` is not declared (hint: `NEW` is declared relative to it)
    error: `type_specifer` is not defined (hint: only rules of the base grammar can be overridden; use `add` for new rules) (hint: did you mean `type_specifier`?)
    error: precedence level `LAMBDA` is not declared (in rules.lambda)
    error: invalid conflict: `call` (hint: a conflict names at least two rules)
    error: `heredoc` is already an external token
    warning: `lambda` is never used (in rules.lambda) (hint: reference it from another rule or remove it)
    ");
}

#[test]
fn precedence_redefinition_is_an_error() {
    let base = mini_c();
    let extension = Extension::new("broken").precedence("CALL", 15, None);

    let err = assemble(&base, &extension).unwrap_err();
    let d = err.diagnostics().unwrap().iter().next().unwrap();

    assert_eq!(d.kind(), DiagnosticKind::PrecedenceRedefined);
    assert_eq!(d.hints(), ["declared as 14, redeclared as 15"]);
}

#[test]
fn relative_level_out_of_range_is_an_error() {
    let base = mini_c();
    let extension = Extension::new("broken")
        .precedence_relative("HUGE", "CALL", i32::MAX)
        .precedence_relative("TINY", "ASSIGNMENT", i32::MIN);

    let err = assemble(&base, &extension).unwrap_err();
    let diagnostics = err.diagnostics().unwrap();

    assert_eq!(
        diagnostics.kinds(),
        [
            DiagnosticKind::InvalidPrecedence,
            DiagnosticKind::InvalidPrecedence
        ]
    );
    let messages: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(messages.join("\n"), @r"
    error: precedence level `HUGE` is out of range (hint: `CALL` (14) + 2147483647 does not fit in i32)
    error: precedence level `TINY` is out of range (hint: `ASSIGNMENT` (-2) + -2147483648 does not fit in i32)
    ");
}

#[test]
fn dynamic_use_of_a_plain_level_stays_dynamic() {
    let base = mini_c();
    let extension = Extension::new("d").extend("declaration", |original| {
        prec_dynamic_level("CALL", original)
    });

    let assembled = assemble(&base, &extension).unwrap();
    let declaration = &assembled.grammar().rules["declaration"];

    assert!(matches!(
        declaration,
        Rule::PrecDynamic {
            value: Precedence::Integer(14),
            ..
        }
    ));
    assert!(assembled.diagnostics().is_empty());
}

#[test]
fn warnings_ride_along() {
    let base = mini_c();
    let extension = Extension::new("mini_cpp").add("orphan", "orphan");

    let assembled = assemble(&base, &extension).unwrap();
    assert_eq!(
        assembled.diagnostics().kinds(),
        [DiagnosticKind::UnreachableRule]
    );

    let strict = Assembler::new(&base)
        .extension(&extension)
        .config(AssemblyConfig::default().with_strict(true))
        .assemble();
    assert!(matches!(strict, Err(Error::StrictWarnings(d)) if d.warning_count() == 1));

    let quiet = Assembler::new(&base)
        .extension(&extension)
        .config(AssemblyConfig::default().with_lint_unreachable(false))
        .assemble()
        .unwrap();
    assert!(quiet.diagnostics().is_empty());
}

#[test]
fn pattern_validation_can_be_disabled() {
    let base = mini_c();
    let extension = Extension::new("mini_cpp").replace("number_literal", pat("[0-9"));

    let err = assemble(&base, &extension).unwrap_err();
    assert_eq!(
        err.diagnostics().unwrap().kinds(),
        [DiagnosticKind::InvalidPattern]
    );

    let config = AssemblyConfig::default().with_validate_patterns(false);
    assert!(
        Assembler::new(&base)
            .extension(&extension)
            .config(config)
            .assemble()
            .is_ok()
    );
}

#[test]
fn externals_append_after_base() {
    let mut g = grammar(
        "host",
        vec![("program", choice([sym("heredoc"), sym("raw_string_literal")]))],
    );
    g.externals = vec![sym("heredoc")];
    let base = BaseGrammar::new(g);

    let extension = Extension::new("derived").external("raw_string_literal");
    let assembled = assemble(&base, &extension).unwrap();
    assert_eq!(
        assembled.grammar().external_names().collect::<Vec<_>>(),
        ["heredoc", "raw_string_literal"]
    );

    let clash = Extension::new("derived").external("heredoc");
    let err = assemble(&base, &clash).unwrap_err();
    let d = err.diagnostics().unwrap().iter().next().unwrap();
    assert_eq!(d.kind(), DiagnosticKind::DuplicateExternal);
    assert_eq!(d.hints(), ["the base grammar already declares it"]);
}

#[test]
fn empty_base_has_no_start_rule() {
    let base = BaseGrammar::new(Grammar::new("nothing"));
    let err = Assembler::new(&base).assemble().unwrap_err();

    assert_eq!(
        err.diagnostics().unwrap().kinds(),
        [DiagnosticKind::MissingStartRule]
    );
}

#[test]
fn without_extension_the_base_is_reproduced() {
    let base = mini_c();
    let assembled = Assembler::new(&base).assemble().unwrap();

    assert_eq!(assembled.grammar(), base.grammar());
}

#[test]
fn tracer_sees_assembly_events() {
    let base = mini_c();
    let extension = decltype_extension();
    let mut tracer = PrintTracer::new(Verbosity::Verbose, Default::default());

    Assembler::new(&base)
        .extension(&extension)
        .tracer(&mut tracer)
        .assemble()
        .unwrap();

    assert_eq!(
        tracer.lines(),
        [
            "     base mini_c (14 rules)",
            "     prec NEW = 15",
            " override type_specifier",
            "      add decltype",
            "conflicts 2 (1 from base)",
            "     pass link: ok",
            "     pass patterns: ok",
            "     pass reach: ok",
            "     pass shape: ok",
        ]
    );
}

#[test]
fn artifact_round_trips_through_json_and_binary() {
    let base = mini_c();
    let grammar = assemble(&base, &decltype_extension())
        .unwrap()
        .into_grammar();

    assert_eq!(Grammar::from_json(&grammar.to_json()).unwrap(), grammar);
    assert_eq!(Grammar::from_binary(&grammar.to_binary()).unwrap(), grammar);
}
