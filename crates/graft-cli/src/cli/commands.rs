//! Command builders for the CLI.
//!
//! Every command that assembles a grammar shares the assembly flags.

use clap::Command;

use super::args::*;

/// Flags of every command that assembles a derived grammar.
fn with_assembly_args(cmd: Command) -> Command {
    cmd.arg(base_arg())
        .arg(binary_base_arg())
        .arg(ext_arg())
        .arg(base_prec_arg())
        .arg(verbose_arg())
        .arg(color_arg())
        .arg(strict_arg())
        .arg(no_unreachable_lint_arg())
        .arg(no_field_lint_arg())
        .arg(no_pattern_check_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("graft")
        .about("Derive tree-sitter grammars by extending a base grammar")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(build_command())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(externals_command())
        .subcommand(extensions_command())
        .subcommand(generate_command())
}

pub fn build_command() -> Command {
    let cmd = Command::new("build")
        .about("Assemble a derived grammar and write it")
        .after_help(
            r#"EXAMPLES:
  graft build --base c/grammar.json --ext cpp                  # grammar.json to stdout
  graft build --base c/grammar.json --ext cpp -o cpp.json
  graft build --base c/grammar.json --ext cpp --binary -o cpp.bin
  graft build --base c/grammar.json --ext cpp -vv              # trace levels and conflicts"#,
        )
        .arg(output_arg())
        .arg(binary_arg());
    with_assembly_args(cmd)
}

/// Validate an extension against a base.
///
/// Silent on success.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Check that an extension assembles on a base grammar")
        .after_help(
            r#"EXAMPLES:
  graft check --base c/grammar.json --ext cpp
  graft check --base c/grammar.json --ext cpp --strict   # warnings fail too"#,
        );
    with_assembly_args(cmd)
}

pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print the assembled rules in grammar DSL form")
        .after_help(
            r#"EXAMPLES:
  graft dump --base c/grammar.json --ext cpp
  graft dump --base c/grammar.json --ext cpp --rule type_specifier"#,
        )
        .arg(rule_arg());
    with_assembly_args(cmd)
}

pub fn externals_command() -> Command {
    Command::new("externals")
        .about("Show external tokens in binding order")
        .after_help(
            r#"EXAMPLES:
  graft externals --ext cpp                       # extension tokens only
  graft externals --ext cpp --base c/grammar.json # full binding order
  graft externals --ext cpp --emit rust           # enum for a Rust scanner
  graft externals --ext cpp --emit c              # enum for a C scanner"#,
        )
        .arg(ext_arg())
        .arg(optional_base_arg())
        .arg(binary_base_arg())
        .arg(emit_arg())
}

pub fn extensions_command() -> Command {
    Command::new("extensions").about("List available extensions")
}

pub fn generate_command() -> Command {
    let cmd = Command::new("generate")
        .about("Assemble a derived grammar and generate its parser with tree-sitter")
        .after_help(
            r#"EXAMPLES:
  graft generate --base c/grammar.json --ext cpp --out tree-sitter-cpp"#,
        )
        .arg(out_dir_arg())
        .arg(tree_sitter_arg());
    with_assembly_args(cmd)
}
