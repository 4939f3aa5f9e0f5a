//! External token listing and scanner enum generation.
//!
//! A host scanner receives tokens by index, so the emitted enums follow the
//! binding order: base tokens first, then the extension's.

use std::fmt::Write as _;
use std::path::PathBuf;

use graft_compiler::fingerprint;
use graft_core::utils::{to_pascal_case, to_screaming_snake_case};
use indexmap::IndexSet;

use super::loader::{load_grammar, require_lang};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Emit {
    #[default]
    List,
    Rust,
    C,
}

pub struct ExternalsArgs {
    pub ext: String,
    pub base: Option<PathBuf>,
    pub binary_base: bool,
    pub emit: Emit,
}

pub fn run(args: ExternalsArgs) {
    let lang = require_lang(&args.ext);

    let mut names: IndexSet<String> = IndexSet::new();
    if let Some(path) = &args.base {
        let grammar = load_grammar(path, args.binary_base).unwrap_or_else(|e| {
            eprintln!("error: {}", e);
            std::process::exit(1);
        });
        names.extend(grammar.external_names().map(str::to_owned));
    }
    for name in lang.extension().externals() {
        if !names.insert(name.clone()) {
            eprintln!(
                "error: external token '{}' is declared by both the base and '{}'",
                name,
                lang.name()
            );
            std::process::exit(1);
        }
    }

    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    print!("{}", render(&names, args.emit));
}

pub fn render(names: &[&str], emit: Emit) -> String {
    let hash = fingerprint(names.iter().copied());
    let mut out = String::new();
    match emit {
        Emit::List => render_list(&mut out, names, hash),
        Emit::Rust => render_rust(&mut out, names, hash),
        Emit::C => render_c(&mut out, names, hash),
    }
    .expect("write to String");
    out
}

fn render_list(out: &mut String, names: &[&str], hash: u32) -> std::fmt::Result {
    for (index, name) in names.iter().enumerate() {
        writeln!(out, "{index}: {name}")?;
    }
    writeln!(out, "fingerprint: {hash:#010x}")
}

fn render_rust(out: &mut String, names: &[&str], hash: u32) -> std::fmt::Result {
    writeln!(out, "pub const EXTERNALS_FINGERPRINT: u32 = {hash:#010x};")?;
    writeln!(out)?;
    writeln!(out, "#[repr(u16)]")?;
    writeln!(out, "#[derive(Clone, Copy, Debug, PartialEq, Eq)]")?;
    writeln!(out, "pub enum TokenType {{")?;
    for (index, name) in names.iter().enumerate() {
        writeln!(out, "    {} = {index},", to_pascal_case(name))?;
    }
    writeln!(out, "}}")
}

fn render_c(out: &mut String, names: &[&str], hash: u32) -> std::fmt::Result {
    writeln!(out, "#define EXTERNALS_FINGERPRINT {hash:#010x}u")?;
    writeln!(out)?;
    writeln!(out, "enum TokenType {{")?;
    for name in names {
        writeln!(out, "  {},", to_screaming_snake_case(name))?;
    }
    writeln!(out, "}};")
}
