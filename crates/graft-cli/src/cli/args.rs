//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Base grammar file (--base).
pub fn base_arg() -> Arg {
    Arg::new("base")
        .long("base")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Base grammar.json (or a binary grammar with --binary-base)")
}

/// Read the base as a binary grammar (--binary-base).
pub fn binary_base_arg() -> Arg {
    Arg::new("binary_base")
        .long("binary-base")
        .action(ArgAction::SetTrue)
        .help("Base grammar is in the binary form written by `build --binary`")
}

/// Extension name (--ext).
pub fn ext_arg() -> Arg {
    Arg::new("ext")
        .long("ext")
        .value_name("NAME")
        .required(true)
        .help("Extension to apply (see `graft extensions`)")
}

/// Named precedence levels of the base (--base-prec).
pub fn base_prec_arg() -> Arg {
    Arg::new("base_prec")
        .long("base-prec")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON object of base precedence levels, replacing the built-in table")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write to file instead of stdout")
}

/// Binary output (--binary).
pub fn binary_arg() -> Arg {
    Arg::new("binary")
        .long("binary")
        .action(ArgAction::SetTrue)
        .help("Write the compact binary form instead of grammar.json")
}

/// Verbosity (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Trace assembly (-v), with precedence and conflicts (-vv), with rule text (-vvv)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Skip the unreachable rule lint (--no-unreachable-lint).
pub fn no_unreachable_lint_arg() -> Arg {
    Arg::new("no_unreachable_lint")
        .long("no-unreachable-lint")
        .action(ArgAction::SetTrue)
        .help("Don't warn about added rules nothing refers to")
}

/// Skip the field shape lint (--no-field-lint).
pub fn no_field_lint_arg() -> Arg {
    Arg::new("no_field_lint")
        .long("no-field-lint")
        .action(ArgAction::SetTrue)
        .help("Don't warn about placeholder rules with missing fields")
}

/// Skip regex validation (--no-pattern-check).
pub fn no_pattern_check_arg() -> Arg {
    Arg::new("no_pattern_check")
        .long("no-pattern-check")
        .action(ArgAction::SetTrue)
        .help("Don't validate regex patterns")
}

/// Single rule to show (--rule).
pub fn rule_arg() -> Arg {
    Arg::new("rule")
        .long("rule")
        .value_name("NAME")
        .help("Show only this rule")
}

/// External token output format (--emit).
pub fn emit_arg() -> Arg {
    Arg::new("emit")
        .long("emit")
        .value_name("FORMAT")
        .default_value("list")
        .value_parser(["list", "rust", "c"])
        .help("Output format")
}

/// Optional base for commands that work without one (--base).
pub fn optional_base_arg() -> Arg {
    base_arg()
        .required(false)
        .help("Base grammar.json; its externals come first")
}

/// Parser output directory (--out).
pub fn out_dir_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Directory to generate the parser in")
}

/// tree-sitter executable (--tree-sitter).
pub fn tree_sitter_arg() -> Arg {
    Arg::new("tree_sitter")
        .long("tree-sitter")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .default_value("tree-sitter")
        .help("tree-sitter CLI to run")
}
