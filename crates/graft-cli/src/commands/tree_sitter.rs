//! Parse table generation through the `tree-sitter` CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use graft_compiler::{EngineError, ParseTableBuilder, parse_generate_output};
use graft_core::Grammar;

/// Runs `tree-sitter generate` on a grammar written into a parser directory.
///
/// The grammar lands in `src/grammar.json` of the output directory, next to the
/// generated `parser.c`.
#[derive(Debug, Clone)]
pub struct TreeSitterCli {
    program: PathBuf,
    out_dir: PathBuf,
}

impl TreeSitterCli {
    pub fn new(program: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            out_dir: out_dir.into(),
        }
    }
}

impl ParseTableBuilder for TreeSitterCli {
    type Output = PathBuf;

    fn build(&self, grammar: &Grammar) -> Result<PathBuf, EngineError> {
        let src = self.out_dir.join("src");
        fs::create_dir_all(&src).map_err(|e| EngineError::Rejected {
            message: format!("failed to create '{}': {e}", src.display()),
        })?;
        let grammar_path = src.join("grammar.json");
        fs::write(&grammar_path, grammar.to_json_pretty()).map_err(|e| {
            EngineError::Rejected {
                message: format!("failed to write '{}': {e}", grammar_path.display()),
            }
        })?;

        let output = Command::new(&self.program)
            .arg("generate")
            .arg(Path::new("src").join("grammar.json"))
            .current_dir(&self.out_dir)
            .output()
            .map_err(|e| EngineError::Rejected {
                message: format!("failed to run '{}': {e}", self.program.display()),
            })?;

        if output.status.success() {
            return Ok(src.join("parser.c"));
        }

        let mut report = String::from_utf8_lossy(&output.stderr).into_owned();
        report.push_str(&String::from_utf8_lossy(&output.stdout));
        Err(
            parse_generate_output(&report).unwrap_or_else(|| EngineError::Rejected {
                message: format!("'{}' exited with {}", self.program.display(), output.status),
            }),
        )
    }
}
