use graft_compiler::{
    AssemblyConfig, BaseGrammar, DiagnosticKind, ExternalBinding, Precedence, Rule, ScanContext,
    Severity,
};
use graft_compiler::test_utils::{SketchParser, Value};
use graft_core::Grammar;

use crate::{LangImpl, c};

/// Rules of the C grammar the C++ extension builds on or refers to.
const C_RULES: &[&str] = &[
    "top_level_item",
    "type_qualifier",
    "_type_specifier",
    "struct_specifier",
    "union_specifier",
    "storage_class_specifier",
    "_field_declaration_list_item",
    "function_definition",
    "declaration_without_semicolon",
    "parameter_declaration",
    "parameter_list",
    "init_declarator",
    "brace_enclosed_body",
    "_declarator",
    "field_declarator",
    "_abstract_declarator",
    "function_declarator",
    "function_field_declarator",
    "abstract_function_declarator",
    "statement",
    "if_clause",
    "for",
    "return_value",
    "_expression",
    "call",
    "field_expression",
    "sizeof_expression",
    "compound_literal_expression",
    "_assignment_left_expression",
    "_field_identifier",
    "_type_identifier",
    "argument_list_block",
    "attribute_specifier",
    "bitfield_clause",
    "comma_expression",
    "declaration",
    "declaration_list",
    "declaration_specifier",
    "declaration_specifiers",
    "empty_declaration",
    "enumerator_list",
    "expression_statement",
    "field_declaration_list",
    "identifier",
    "initializer_list",
    "ms_declspec_modifier",
    "parameter_list_block",
    "primitive_type",
    "sized_type_specifier",
    "string_literal",
    "type_definition",
    "type_descriptor",
];

/// A C grammar reduced to its rule names; each rule matches its own name.
fn stub_c() -> BaseGrammar {
    let mut grammar = Grammar::new("c");
    grammar.rules.insert(
        "translation_unit".to_owned(),
        Rule::Repeat(Box::new(Rule::symbol("top_level_item"))),
    );
    for name in C_RULES {
        grammar.rules.insert((*name).to_owned(), Rule::from(*name));
    }
    BaseGrammar::new(grammar).with_precedence(c::precedence_table())
}

fn assembled() -> graft_compiler::Assembled {
    crate::cpp()
        .assemble(&stub_c(), AssemblyConfig::default())
        .unwrap()
}

#[test]
fn assembles_on_c() {
    let assembled = assembled();
    let grammar = assembled.grammar();

    assert_eq!(grammar.name, "cpp");
    assert_eq!(grammar.inherits.as_deref(), Some("c"));
    assert_eq!(grammar.start_rule(), Some("translation_unit"));
    for diagnostic in assembled.diagnostics().iter() {
        assert_eq!(diagnostic.severity(), Severity::Warning);
        assert_eq!(diagnostic.kind(), DiagnosticKind::UnreachableRule);
    }
}

#[test]
fn base_rules_keep_their_place() {
    let grammar = assembled().into_grammar();
    let names: Vec<&str> = grammar.rules.keys().map(String::as_str).collect();

    assert_eq!(names[0], "translation_unit");
    assert_eq!(names[1..=C_RULES.len()], *C_RULES);
    assert_eq!(names[C_RULES.len() + 1], "decltype");
}

#[test]
fn extended_rules_keep_the_original() {
    let grammar = assembled().into_grammar();

    assert_eq!(
        grammar.rules["statement"],
        Rule::Choice(vec![
            Rule::from("statement"),
            Rule::symbol("try"),
            Rule::symbol("throw"),
        ])
    );
    insta::assert_snapshot!(grammar.rules["brace_enclosed_body"], @r#"prec(-1, "brace_enclosed_body")"#);
}

#[test]
fn named_levels_resolve() {
    let assembled = assembled();
    let rules = &assembled.grammar().rules;

    let Rule::PrecRight { value, .. } = &rules["new_expression"] else {
        panic!("new_expression is not right-associative: {}", rules["new_expression"]);
    };
    assert_eq!(*value, Precedence::Integer(15));

    let Rule::Prec { value, .. } = &rules["lambda_capture_specifier"] else {
        panic!("lambda_capture_specifier has no precedence");
    };
    assert_eq!(*value, Precedence::Integer(18));

    assert!(matches!(
        rules["structured_binding_declarator"],
        Rule::PrecDynamic {
            value: Precedence::Integer(-1),
            ..
        }
    ));
    assert_eq!(assembled.precedence().resolve("NEW"), Ok(15));
}

#[test]
fn conflicts_and_externals() {
    let grammar = assembled().into_grammar();

    assert_eq!(grammar.conflicts.len(), 15);
    assert_eq!(grammar.conflicts[0], ["template_function", "template_type"]);
    assert_eq!(grammar.inline, ["_namespace_identifier"]);
    assert_eq!(
        grammar.external_names().collect::<Vec<_>>(),
        ["raw_string_literal"]
    );
}

#[test]
fn raw_strings_are_bound() {
    let grammar = assembled().into_grammar();
    let lang = crate::cpp();
    let binding = ExternalBinding::bind(&grammar, lang.extension().recognizers()).unwrap();

    assert_eq!(binding.index_of("raw_string_literal"), Some(0));
    let recognizer = binding.recognizer(0).unwrap();
    let input = r#"R"sql(select ")")sql""#;
    assert_eq!(
        recognizer.recognize(input, 0, &ScanContext::new()),
        Ok(0..input.len())
    );
}

#[test]
fn placeholder_fields_are_uniform() {
    let assembled = assembled();
    let rules = &assembled.grammar().rules;

    insta::assert_snapshot!(rules["if_clause"], @r#"prec.dynamic(0, seq("if", choice(field("modifier_list", "constexpr"), field("modifier_list", blank())), "(", $.condition, ")", $.statement))"#);
    assert!(
        !assembled
            .diagnostics()
            .kinds()
            .contains(&DiagnosticKind::NonUniformFields)
    );
}

/// The assembled `if_clause` with `condition` and `statement` reduced to one token each.
fn if_clause_grammar() -> Grammar {
    let assembled = assembled();
    let mut grammar = Grammar::new("if_clause");
    grammar.rules.insert(
        "if_clause".to_owned(),
        assembled.grammar().rules["if_clause"].clone(),
    );
    grammar
        .rules
        .insert("condition".to_owned(), Rule::pattern("[a-z]+"));
    grammar.rules.insert("statement".to_owned(), Rule::from(";"));
    grammar
}

#[test]
fn if_clause_parses_with_and_without_constexpr() {
    let grammar = if_clause_grammar();
    let mut parser = SketchParser::new(&grammar);

    let with = parser.parse("if_clause", "if constexpr (x) ;").unwrap();
    let without = parser.parse("if_clause", "if (x) ;").unwrap();

    insta::assert_snapshot!(with.sexp(), @r#"(if_clause modifier_list: "constexpr" (condition) (statement))"#);
    insta::assert_snapshot!(without.sexp(), @"(if_clause modifier_list: () (condition) (statement))");

    assert_eq!(with.field_names(), ["modifier_list"]);
    assert_eq!(without.field_names(), ["modifier_list"]);
    assert_eq!(
        with.field("modifier_list"),
        Some(&Value::Token("constexpr".to_owned()))
    );
    assert_eq!(without.field("modifier_list"), Some(&Value::Placeholder));
}

#[test]
fn reserved_slots_never_match() {
    let grammar = assembled().into_grammar();
    let Rule::Seq(members) = &grammar.rules["class_specifier_name"] else {
        panic!("class_specifier_name is not a sequence");
    };
    let Rule::Choice(arms) = &members[1] else {
        panic!("modifier_list is not a placeholder");
    };
    let Rule::Field { content, .. } = &arms[0] else {
        panic!("modifier_list has no field arm");
    };
    let Rule::String(literal) = content.as_ref() else {
        panic!("reserved slot is not a literal");
    };
    assert!(literal.starts_with("!!UNMATCHABLE_"));
}
