use super::*;

#[test]
fn parse_minimal_grammar() {
    let json = r#"{
        "name": "test",
        "rules": {
            "source_file": { "type": "SYMBOL", "name": "expression" },
            "expression": { "type": "STRING", "value": "x" }
        }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(grammar.name, "test");
    assert_eq!(grammar.rules.len(), 2);
    assert_eq!(grammar.start_rule(), Some("source_file"));
}

#[test]
fn parse_from_bytes() {
    let json = br#"{"name": "test", "rules": {"source_file": {"type": "BLANK"}}}"#;
    let grammar = Grammar::from_json_slice(json).unwrap();
    assert_eq!(grammar.start_rule(), Some("source_file"));

    let invalid = b"{\"name\": \"te\xffst\", \"rules\": {}}";
    assert!(matches!(
        Grammar::from_json_slice(invalid),
        Err(GrammarError::Json(_))
    ));
}

#[test]
fn parse_optional_as_choice_with_blank() {
    let json = r#"{
        "name": "test",
        "rules": {
            "root": {
                "type": "SEQ",
                "members": [
                    { "type": "STRING", "value": "a" },
                    { "type": "CHOICE", "members": [
                        { "type": "STRING", "value": "b" },
                        { "type": "BLANK" }
                    ]}
                ]
            }
        }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    let Rule::Seq(members) = &grammar.rules["root"] else {
        panic!("expected seq");
    };
    assert_eq!(members[1].as_optional(), Some(&Rule::string("b")));
}

#[test]
fn parse_named_and_dynamic_precedence() {
    let json = r#"{
        "name": "test",
        "rules": {
            "call": {
                "type": "PREC_LEFT",
                "value": "call",
                "content": {
                    "type": "PREC_DYNAMIC",
                    "value": -1,
                    "content": { "type": "SYMBOL", "name": "x" }
                }
            },
            "x": { "type": "STRING", "value": "x" }
        },
        "precedences": [[
            { "type": "STRING", "value": "call" },
            { "type": "SYMBOL", "name": "x" }
        ]]
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    let Rule::PrecLeft { value, content } = &grammar.rules["call"] else {
        panic!("expected prec.left");
    };
    assert_eq!(value, &Precedence::Name("call".into()));
    assert!(matches!(**content, Rule::PrecDynamic { value: Precedence::Integer(-1), .. }));
    assert_eq!(
        grammar.precedences[0],
        vec![
            PrecedenceEntry::Name("call".into()),
            PrecedenceEntry::Symbol("x".into())
        ]
    );
    assert_eq!(grammar.ordered_precedence_names().collect::<Vec<_>>(), ["call"]);
}

#[test]
fn preserves_rule_order() {
    let json = r#"{
        "name": "test",
        "rules": {
            "program": { "type": "SYMBOL", "name": "statement" },
            "statement": { "type": "SYMBOL", "name": "expression" },
            "expression": { "type": "STRING", "value": "x" }
        }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();

    let names: Vec<_> = grammar.rules.keys().map(String::as_str).collect();
    assert_eq!(names, ["program", "statement", "expression"]);
}

#[test]
fn parse_metadata() {
    let json = r#"{
        "name": "c",
        "word": "identifier",
        "rules": {
            "translation_unit": { "type": "REPEAT", "content": { "type": "SYMBOL", "name": "identifier" } },
            "identifier": { "type": "PATTERN", "value": "[a-z]+", "flags": "i" }
        },
        "extras": [{ "type": "PATTERN", "value": "\\s" }],
        "conflicts": [["identifier", "translation_unit"]],
        "externals": [{ "type": "SYMBOL", "name": "raw_string_literal" }],
        "inline": ["identifier"],
        "supertypes": ["identifier"]
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    assert_eq!(grammar.word.as_deref(), Some("identifier"));
    assert_eq!(grammar.conflicts, [["identifier", "translation_unit"]]);
    assert_eq!(
        grammar.external_names().collect::<Vec<_>>(),
        ["raw_string_literal"]
    );
    assert_eq!(grammar.inline, ["identifier"]);
    assert_eq!(grammar.supertypes, ["identifier"]);
    assert!(grammar.defines("raw_string_literal"));
    assert!(!grammar.defines("statement"));
    assert_eq!(
        grammar.rules["identifier"],
        Rule::Pattern {
            value: "[a-z]+".into(),
            flags: Some("i".into())
        }
    );
}

#[test]
fn write_then_read_keeps_every_field() {
    let json = r#"{
        "name": "cpp",
        "inherits": "c",
        "word": "identifier",
        "rules": {
            "translation_unit": {
                "type": "FIELD",
                "name": "body",
                "content": {
                    "type": "ALIAS",
                    "content": { "type": "TOKEN", "content": { "type": "STRING", "value": "x" } },
                    "value": "identifier",
                    "named": true
                }
            },
            "identifier": {
                "type": "RESERVED",
                "context_name": "global",
                "content": { "type": "IMMEDIATE_TOKEN", "content": { "type": "PATTERN", "value": "[a-z]+" } }
            }
        },
        "extras": [],
        "conflicts": [["translation_unit", "identifier"]],
        "precedences": [[{ "type": "STRING", "value": "unary" }]],
        "externals": [{ "type": "SYMBOL", "name": "raw_string_literal" }],
        "inline": [],
        "supertypes": [],
        "reserved": { "global": [{ "type": "STRING", "value": "if" }] }
    }"#;

    let grammar = Grammar::from_json(json).unwrap();
    let compact = Grammar::from_json(&grammar.to_json()).unwrap();
    let pretty = Grammar::from_json(&grammar.to_json_pretty()).unwrap();

    assert_eq!(compact, grammar);
    assert_eq!(pretty, grammar);
}

#[test]
fn write_omits_absent_optionals() {
    let mut grammar = Grammar::new("tiny");
    grammar.rules.insert("root".into(), Rule::Blank);

    insta::assert_snapshot!(grammar.to_json(), @r#"{"name":"tiny","rules":{"root":{"type":"BLANK"}},"extras":[],"conflicts":[],"precedences":[],"externals":[],"inline":[],"supertypes":[]}"#);
}

#[test]
fn reject_unknown_rule_type() {
    let json = r#"{ "name": "t", "rules": { "r": { "type": "LOOKAHEAD" } } }"#;

    let err = Grammar::from_json(json).unwrap_err();
    assert!(matches!(err, GrammarError::Json(_)));
    assert!(err.to_string().starts_with("JSON parse error:"));
}
