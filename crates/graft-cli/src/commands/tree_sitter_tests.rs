use graft_compiler::{EngineError, ParseTableBuilder};
use graft_core::{Grammar, Rule};

use super::tree_sitter::TreeSitterCli;

fn grammar() -> Grammar {
    let mut grammar = Grammar::new("test");
    grammar
        .rules
        .insert("source_file".to_owned(), Rule::string("x"));
    grammar
}

#[test]
fn missing_program_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cli = TreeSitterCli::new(dir.path().join("no-such-tree-sitter"), dir.path());

    let err = cli.build(&grammar()).unwrap_err();
    let EngineError::Rejected { message } = &err else {
        panic!("expected a rejection, got {err:?}");
    };
    assert!(message.starts_with("failed to run '"));
    assert!(dir.path().join("src").join("grammar.json").exists());
}

#[cfg(unix)]
mod fake_cli {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use indoc::indoc;

    use super::*;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("tree-sitter");
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn writes_grammar_and_returns_parser() {
        let bin = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let program = script(
            bin.path(),
            indoc! {r#"
                #!/bin/sh
                [ "$1" = generate ] && [ -f "$2" ] || exit 2
                touch src/parser.c
            "#},
        );

        let parser = TreeSitterCli::new(program, out.path())
            .build(&grammar())
            .unwrap();
        assert_eq!(parser, out.path().join("src").join("parser.c"));
        assert!(parser.exists());

        let written = fs::read_to_string(out.path().join("src").join("grammar.json")).unwrap();
        assert_eq!(Grammar::from_json(&written).unwrap(), grammar());
    }

    #[test]
    fn unresolved_conflict_names_rules() {
        let bin = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let program = script(
            bin.path(),
            indoc! {r#"
                #!/bin/sh
                echo "Unresolved conflict for symbol sequence:" >&2
                echo "Possible resolutions:" >&2
                echo "Add a conflict for these rules: \`template_function\`, \`template_type\`" >&2
                exit 1
            "#},
        );

        let err = TreeSitterCli::new(program, out.path())
            .build(&grammar())
            .unwrap_err();
        let EngineError::UndeclaredAmbiguity { rules, .. } = &err else {
            panic!("expected an ambiguity, got {err:?}");
        };
        assert_eq!(*rules, ["template_function", "template_type"]);
    }

    #[test]
    fn silent_failure_reports_exit_status() {
        let bin = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let program = script(bin.path(), "#!/bin/sh\nexit 3\n");

        let err = TreeSitterCli::new(program, out.path())
            .build(&grammar())
            .unwrap_err();
        let EngineError::Rejected { message } = &err else {
            panic!("expected a rejection, got {err:?}");
        };
        assert!(message.contains("exited with"));
    }
}
