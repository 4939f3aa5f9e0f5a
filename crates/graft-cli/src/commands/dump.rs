use std::fmt::Write as _;

use graft_core::{Colors, Grammar};

use super::loader::{AssemblyArgs, assemble_or_exit};

pub struct DumpArgs {
    pub assembly: AssemblyArgs,
    pub rule: Option<String>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let grammar = assemble_or_exit(&args.assembly).into_grammar();
    let colors = Colors::new(args.color);

    match render(&grammar, args.rule.as_deref(), colors) {
        Some(text) => print!("{}", text),
        None => {
            eprintln!(
                "error: rule '{}' is not defined in '{}'",
                args.rule.unwrap_or_default(),
                grammar.name
            );
            std::process::exit(1);
        }
    }
}

/// Rules as `name: rule` lines; `None` if `only` names no rule.
pub fn render(grammar: &Grammar, only: Option<&str>, colors: Colors) -> Option<String> {
    let mut out = String::new();
    for (name, rule) in &grammar.rules {
        if only.is_some_and(|only| only != name) {
            continue;
        }
        writeln!(out, "{}: {}", colors.rule(name), rule).expect("write to String");
    }
    (only.is_none() || !out.is_empty()).then_some(out)
}
