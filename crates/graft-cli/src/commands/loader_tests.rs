use std::fs;

use graft_compiler::Verbosity;
use indoc::indoc;

use super::loader::{
    AssemblyArgs, LoadError, load_grammar, load_precedence, suggest_lang, verbosity,
};

const GRAMMAR: &str = indoc! {r#"
    {
      "name": "c",
      "rules": {
        "translation_unit": { "type": "REPEAT", "content": { "type": "SYMBOL", "name": "item" } },
        "item": { "type": "STRING", "value": ";" }
      },
      "externals": [{ "type": "SYMBOL", "name": "heredoc_start" }]
    }
"#};

#[test]
fn loads_grammar_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.json");
    fs::write(&path, GRAMMAR).unwrap();

    let grammar = load_grammar(&path, false).unwrap();
    assert_eq!(grammar.name, "c");
    assert_eq!(grammar.start_rule(), Some("translation_unit"));
    assert_eq!(grammar.external_names().collect::<Vec<_>>(), ["heredoc_start"]);
}

#[test]
fn loads_binary_grammar() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("grammar.json");
    let binary = dir.path().join("grammar.bin");
    fs::write(&json, GRAMMAR).unwrap();
    let grammar = load_grammar(&json, false).unwrap();
    fs::write(&binary, grammar.to_binary()).unwrap();

    assert_eq!(load_grammar(&binary, true).unwrap(), grammar);
    assert!(matches!(
        load_grammar(&binary, false),
        Err(LoadError::Grammar { .. })
    ));
}

#[test]
fn invalid_utf8_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.json");
    let mut bytes = GRAMMAR.as_bytes().to_vec();
    let at = GRAMMAR.find("\"item\": {").unwrap() + 2;
    bytes.insert(at, 0xff);
    fs::write(&path, bytes).unwrap();

    let err = load_grammar(&path, false).unwrap_err();
    assert!(matches!(err, LoadError::Grammar { .. }));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let err = load_grammar(&path, false).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read '"));
}

#[test]
fn precedence_levels_keep_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prec.json");
    fs::write(&path, r#"{ "UNARY": 14, "CALL": 15, "ASSIGNMENT": -2 }"#).unwrap();

    let table = load_precedence(&path).unwrap();
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        ["UNARY", "CALL", "ASSIGNMENT"]
    );
    assert_eq!(table.resolve("ASSIGNMENT"), Ok(-2));
}

#[test]
fn precedence_values_must_be_integers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prec.json");
    fs::write(&path, r#"{ "CALL": "high" }"#).unwrap();

    let err = load_precedence(&path).unwrap_err();
    assert!(matches!(err, LoadError::Precedence { .. }));
    assert!(err.to_string().starts_with("invalid precedence file '"));
}

#[test]
#[cfg(feature = "lang-cpp")]
fn base_precedence_file_replaces_builtin_levels() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = dir.path().join("grammar.json");
    let prec = dir.path().join("prec.json");
    fs::write(&grammar, GRAMMAR).unwrap();
    fs::write(&prec, r#"{ "CALL": 3 }"#).unwrap();
    let lang = graft_langs::cpp();

    let base = super::loader::load_base(&lang, &grammar, false, Some(&prec)).unwrap();
    assert_eq!(base.original_precedence_table().len(), 1);

    let base = super::loader::load_base(&lang, &grammar, false, None).unwrap();
    assert_eq!(base.original_precedence_table().resolve("CALL"), Ok(14));
}

#[test]
#[cfg(feature = "lang-cpp")]
fn suggests_close_names() {
    assert_eq!(suggest_lang("cp").as_deref(), Some("cpp"));
    assert_eq!(suggest_lang("CPX").as_deref(), Some("cpp"));
    assert_eq!(suggest_lang("haskell"), None);
}

#[test]
fn verbosity_counts() {
    assert_eq!(verbosity(0), None);
    assert_eq!(verbosity(1), Some(Verbosity::Default));
    assert_eq!(verbosity(2), Some(Verbosity::Verbose));
    assert_eq!(verbosity(5), Some(Verbosity::VeryVerbose));
}

#[test]
fn config_follows_flags() {
    let args = AssemblyArgs {
        base: "c.json".into(),
        binary_base: false,
        ext: "cpp".into(),
        base_prec: None,
        verbose: 0,
        strict: true,
        lint_unreachable: false,
        lint_field_shapes: true,
        validate_patterns: false,
        color: false,
    };
    let config = args.config();

    assert!(config.strict);
    assert!(!config.lint_unreachable);
    assert!(config.lint_field_shapes);
    assert!(!config.validate_patterns);
}
