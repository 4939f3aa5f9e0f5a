//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `AssemblyParams` carries the flags shared by every assembling command
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::externals::{Emit, ExternalsArgs};
use crate::commands::generate::GenerateArgs;
use crate::commands::loader::AssemblyArgs;

pub struct AssemblyParams {
    pub base: PathBuf,
    pub binary_base: bool,
    pub ext: String,
    pub base_prec: Option<PathBuf>,
    pub verbose: u8,
    pub strict: bool,
    pub no_unreachable_lint: bool,
    pub no_field_lint: bool,
    pub no_pattern_check: bool,
    pub color: ColorChoice,
}

impl AssemblyParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            base: m.get_one::<PathBuf>("base").cloned().unwrap_or_default(),
            binary_base: m.get_flag("binary_base"),
            ext: m.get_one::<String>("ext").cloned().unwrap_or_default(),
            base_prec: m.get_one::<PathBuf>("base_prec").cloned(),
            verbose: m.get_count("verbose"),
            strict: m.get_flag("strict"),
            no_unreachable_lint: m.get_flag("no_unreachable_lint"),
            no_field_lint: m.get_flag("no_field_lint"),
            no_pattern_check: m.get_flag("no_pattern_check"),
            color: parse_color(m),
        }
    }
}

impl From<AssemblyParams> for AssemblyArgs {
    fn from(p: AssemblyParams) -> Self {
        Self {
            base: p.base,
            binary_base: p.binary_base,
            ext: p.ext,
            base_prec: p.base_prec,
            verbose: p.verbose,
            strict: p.strict,
            lint_unreachable: !p.no_unreachable_lint,
            lint_field_shapes: !p.no_field_lint,
            validate_patterns: !p.no_pattern_check,
            color: p.color.should_colorize(),
        }
    }
}

pub struct BuildParams {
    pub assembly: AssemblyParams,
    pub output: Option<PathBuf>,
    pub binary: bool,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            assembly: AssemblyParams::from_matches(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            binary: m.get_flag("binary"),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            assembly: p.assembly.into(),
            output: p.output,
            binary: p.binary,
        }
    }
}

pub struct CheckParams {
    pub assembly: AssemblyParams,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            assembly: AssemblyParams::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            assembly: p.assembly.into(),
        }
    }
}

pub struct DumpParams {
    pub assembly: AssemblyParams,
    pub rule: Option<String>,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            assembly: AssemblyParams::from_matches(m),
            rule: m.get_one::<String>("rule").cloned(),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        let color = p.assembly.color.should_colorize();
        Self {
            assembly: p.assembly.into(),
            rule: p.rule,
            color,
        }
    }
}

pub struct ExternalsParams {
    pub ext: String,
    pub base: Option<PathBuf>,
    pub binary_base: bool,
    pub emit: String,
}

impl ExternalsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            ext: m.get_one::<String>("ext").cloned().unwrap_or_default(),
            base: m.get_one::<PathBuf>("base").cloned(),
            binary_base: m.get_flag("binary_base"),
            emit: m
                .get_one::<String>("emit")
                .cloned()
                .unwrap_or_else(|| "list".to_string()),
        }
    }
}

impl From<ExternalsParams> for ExternalsArgs {
    fn from(p: ExternalsParams) -> Self {
        let emit = match p.emit.as_str() {
            "rust" => Emit::Rust,
            "c" => Emit::C,
            _ => Emit::List,
        };
        Self {
            ext: p.ext,
            base: p.base,
            binary_base: p.binary_base,
            emit,
        }
    }
}

/// `extensions` takes no arguments.
pub struct ExtensionsParams;

impl ExtensionsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

pub struct GenerateParams {
    pub assembly: AssemblyParams,
    pub out: PathBuf,
    pub tree_sitter: PathBuf,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            assembly: AssemblyParams::from_matches(m),
            out: m.get_one::<PathBuf>("out").cloned().unwrap_or_default(),
            tree_sitter: m
                .get_one::<PathBuf>("tree_sitter")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("tree-sitter")),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            assembly: p.assembly.into(),
            out: p.out,
            tree_sitter: p.tree_sitter,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
