use std::path::PathBuf;

use super::loader::{AssemblyArgs, assemble_or_exit, write_output};

pub struct BuildArgs {
    pub assembly: AssemblyArgs,
    pub output: Option<PathBuf>,
    pub binary: bool,
}

pub fn run(args: BuildArgs) {
    let grammar = assemble_or_exit(&args.assembly).into_grammar();

    let bytes = if args.binary {
        grammar.to_binary()
    } else {
        let mut json = grammar.to_json_pretty();
        json.push('\n');
        json.into_bytes()
    };

    if let Err(e) = write_output(args.output.as_deref(), &bytes) {
        eprintln!("error: failed to write output: {}", e);
        std::process::exit(1);
    }
}
