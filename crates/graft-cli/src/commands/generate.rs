use std::path::PathBuf;

use graft_compiler::{EngineError, ParseTableBuilder};

use super::loader::{AssemblyArgs, assemble_or_exit};
use super::tree_sitter::TreeSitterCli;

pub struct GenerateArgs {
    pub assembly: AssemblyArgs,
    pub out: PathBuf,
    pub tree_sitter: PathBuf,
}

pub fn run(args: GenerateArgs) {
    let grammar = assemble_or_exit(&args.assembly).into_grammar();
    let generator = TreeSitterCli::new(args.tree_sitter, args.out);

    match generator.build(&grammar) {
        Ok(parser) => println!("{}", parser.display()),
        Err(e @ EngineError::UndeclaredAmbiguity { .. }) => {
            eprintln!("error: {}", e);
            eprintln!();
            eprintln!(
                "hint: declare the conflict in the '{}' extension",
                args.assembly.ext
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
