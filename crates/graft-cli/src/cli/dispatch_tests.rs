//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Shared assembly flags parse the same way on every assembling command
//! 2. Lint switches invert into the assembly configuration
//! 3. Defaults for optional flags

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{
    build_command, check_command, dump_command, externals_command, generate_command,
};
use crate::commands::build::BuildArgs;
use crate::commands::externals::{Emit, ExternalsArgs};
use crate::commands::generate::GenerateArgs;

#[test]
fn build_extracts_assembly_flags() {
    let m = build_command()
        .try_get_matches_from([
            "build",
            "--base",
            "c.json",
            "--ext",
            "cpp",
            "-vv",
            "--strict",
            "--color",
            "never",
            "-o",
            "cpp.json",
        ])
        .unwrap();
    let params = BuildParams::from_matches(&m);

    assert_eq!(params.assembly.base, PathBuf::from("c.json"));
    assert_eq!(params.assembly.ext, "cpp");
    assert_eq!(params.assembly.verbose, 2);
    assert!(params.assembly.strict);
    assert_eq!(params.assembly.color, ColorChoice::Never);
    assert_eq!(params.output, Some(PathBuf::from("cpp.json")));
    assert!(!params.binary);
}

#[test]
fn lint_switches_invert() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "--base",
            "c.json",
            "--ext",
            "cpp",
            "--no-field-lint",
            "--no-pattern-check",
        ])
        .unwrap();
    let args: crate::commands::check::CheckArgs = CheckParams::from_matches(&m).into();

    assert!(args.assembly.lint_unreachable);
    assert!(!args.assembly.lint_field_shapes);
    assert!(!args.assembly.validate_patterns);
    assert!(!args.assembly.strict);
    assert_eq!(args.assembly.verbose, 0);
}

#[test]
fn base_and_ext_are_required() {
    let result = build_command().try_get_matches_from(["build", "--ext", "cpp"]);
    assert!(result.is_err(), "build without --base should fail");

    let result = check_command().try_get_matches_from(["check", "--base", "c.json"]);
    assert!(result.is_err(), "check without --ext should fail");
}

#[test]
fn binary_output() {
    let m = build_command()
        .try_get_matches_from([
            "build",
            "--base",
            "c.bin",
            "--binary-base",
            "--ext",
            "cpp",
            "--binary",
        ])
        .unwrap();
    let args: BuildArgs = BuildParams::from_matches(&m).into();

    assert!(args.binary);
    assert!(args.assembly.binary_base);
    assert_eq!(args.output, None);
}

#[test]
fn dump_rule_filter() {
    let m = dump_command()
        .try_get_matches_from([
            "dump",
            "--base",
            "c.json",
            "--ext",
            "cpp",
            "--rule",
            "type_specifier",
            "--color",
            "always",
        ])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.rule.as_deref(), Some("type_specifier"));
    assert!(params.assembly.color.should_colorize());
}

#[test]
fn externals_base_is_optional() {
    let m = externals_command()
        .try_get_matches_from(["externals", "--ext", "cpp"])
        .unwrap();
    let args: ExternalsArgs = ExternalsParams::from_matches(&m).into();

    assert_eq!(args.ext, "cpp");
    assert_eq!(args.base, None);
    assert_eq!(args.emit, Emit::List);
}

#[test]
fn externals_emit_formats() {
    let m = externals_command()
        .try_get_matches_from(["externals", "--ext", "cpp", "--emit", "c"])
        .unwrap();
    let args: ExternalsArgs = ExternalsParams::from_matches(&m).into();
    assert_eq!(args.emit, Emit::C);

    let result =
        externals_command().try_get_matches_from(["externals", "--ext", "cpp", "--emit", "go"]);
    assert!(result.is_err(), "unknown --emit value should fail");
}

#[test]
fn generate_defaults_to_path_tree_sitter() {
    let m = generate_command()
        .try_get_matches_from([
            "generate",
            "--base",
            "c.json",
            "--ext",
            "cpp",
            "--out",
            "parser",
        ])
        .unwrap();
    let args: GenerateArgs = GenerateParams::from_matches(&m).into();

    assert_eq!(args.out, PathBuf::from("parser"));
    assert_eq!(args.tree_sitter, PathBuf::from("tree-sitter"));
}

#[test]
fn cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["graft"]);
    assert!(result.is_err());

    let m = build_cli()
        .try_get_matches_from(["graft", "extensions"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("extensions"));
}
