use graft_core::Rule;

use crate::dsl::*;
use crate::{choice, seq};

#[test]
fn macros_accept_literals_and_rules() {
    let rule = seq!["(", choice!["int", sym("type_identifier")], ")"];

    insta::assert_snapshot!(rule, @r#"seq("(", choice("int", $.type_identifier), ")")"#);
}

#[test]
fn comma_separated_lists() {
    insta::assert_snapshot!(comma_sep1(sym("x")), @r#"seq($.x, repeat(seq(",", $.x)))"#);
    insta::assert_snapshot!(comma_sep(sym("x")), @r#"optional(seq($.x, repeat(seq(",", $.x))))"#);
}

#[test]
fn aliases_and_tokens() {
    let rule = seq([
        alias_sym(sym("identifier"), "namespace_identifier"),
        alias_lit(token("::"), "::"),
        immediate(pat("[0-9]+")),
        pat_flags("true", "i"),
    ]);

    insta::assert_snapshot!(rule, @r#"seq(alias($.identifier, $.namespace_identifier), alias(token("::"), "::"), token.immediate(/[0-9]+/), /true/i)"#);
}

#[test]
fn precedence_constructors() {
    let rule = choice([
        prec(1, "a"),
        prec_left(2, "b"),
        prec_right(3, "c"),
        prec_dynamic(-1, "d"),
        prec_level("CALL", "e"),
        prec_right_level("ASSIGNMENT", "f"),
    ]);

    insta::assert_snapshot!(rule, @r#"choice(prec(1, "a"), prec.left(2, "b"), prec.right(3, "c"), prec.dynamic(-1, "d"), prec("CALL", "e"), prec.right("ASSIGNMENT", "f"))"#);
}

#[test]
fn optional_is_choice_with_blank() {
    assert_eq!(optional("x"), Rule::Choice(vec!["x".into(), blank()]));
    assert_eq!(repeat1("x"), Rule::Repeat1(Box::new("x".into())));
}
