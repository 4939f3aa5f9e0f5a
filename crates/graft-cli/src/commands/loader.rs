//! Loading the inputs of an assembly and running it for a command.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use graft_compiler::{
    Assembled, Assembler, AssemblyConfig, BaseGrammar, PrecedenceTable, PrintTracer, Verbosity,
};
use graft_core::{Colors, Grammar, GrammarError};
use graft_langs::Lang;
use indexmap::IndexMap;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid base grammar '{}': {source}", path.display())]
    Grammar {
        path: PathBuf,
        #[source]
        source: GrammarError,
    },

    #[error("invalid precedence file '{}': {source}", path.display())]
    Precedence {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Flags shared by every command that assembles a derived grammar.
pub struct AssemblyArgs {
    pub base: PathBuf,
    pub binary_base: bool,
    pub ext: String,
    pub base_prec: Option<PathBuf>,
    pub verbose: u8,
    pub strict: bool,
    pub lint_unreachable: bool,
    pub lint_field_shapes: bool,
    pub validate_patterns: bool,
    pub color: bool,
}

impl AssemblyArgs {
    pub fn config(&self) -> AssemblyConfig {
        AssemblyConfig::default()
            .with_lint_unreachable(self.lint_unreachable)
            .with_lint_field_shapes(self.lint_field_shapes)
            .with_validate_patterns(self.validate_patterns)
            .with_strict(self.strict)
    }
}

/// Trace verbosity for a `-v` count; `None` disables tracing.
pub fn verbosity(count: u8) -> Option<Verbosity> {
    match count {
        0 => None,
        1 => Some(Verbosity::Default),
        2 => Some(Verbosity::Verbose),
        _ => Some(Verbosity::VeryVerbose),
    }
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Read a grammar from `grammar.json`, or from the binary form.
pub fn load_grammar(path: &Path, binary: bool) -> Result<Grammar, LoadError> {
    let bytes = read(path)?;
    let grammar = if binary {
        Grammar::from_binary(&bytes)
    } else {
        Grammar::from_json_slice(&bytes)
    };
    grammar.map_err(|source| LoadError::Grammar {
        path: path.to_owned(),
        source,
    })
}

/// Read precedence levels from a JSON object of names to values.
pub fn load_precedence(path: &Path) -> Result<PrecedenceTable, LoadError> {
    let bytes = read(path)?;
    let levels: IndexMap<String, i32> =
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Precedence {
            path: path.to_owned(),
            source,
        })?;
    Ok(PrecedenceTable::from_levels(
        levels.iter().map(|(name, value)| (name.as_str(), *value)),
    ))
}

/// Read the base grammar for `lang`.
///
/// Levels from `base_prec` replace the ones the language ships with.
pub fn load_base(
    lang: &Lang,
    path: &Path,
    binary: bool,
    base_prec: Option<&Path>,
) -> Result<BaseGrammar, LoadError> {
    let grammar = load_grammar(path, binary)?;
    match base_prec {
        Some(prec) => Ok(BaseGrammar::new(grammar).with_precedence(load_precedence(prec)?)),
        None => Ok(lang.base(grammar)),
    }
}

/// Resolve an extension name, exiting with a suggestion if it is unknown.
pub fn require_lang(name: &str) -> Lang {
    if let Some(lang) = graft_langs::from_name(name) {
        return lang;
    }

    eprintln!("error: unknown extension: '{}'", name);
    if let Some(suggestion) = suggest_lang(name) {
        eprintln!();
        eprintln!("Did you mean '{}'?", suggestion);
    }
    eprintln!();
    eprintln!("Run 'graft extensions' for the full list.");
    std::process::exit(1);
}

/// Suggest a similar extension name for typos.
pub fn suggest_lang(input: &str) -> Option<String> {
    let input = input.to_lowercase();
    graft_langs::all()
        .into_iter()
        .filter(|lang| levenshtein(lang.name(), &input) <= 2)
        .min_by_key(|lang| levenshtein(lang.name(), &input))
        .map(|lang| lang.name().to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev = (0..=b.len()).collect::<Vec<_>>();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Load, assemble and report, exiting on failure.
///
/// Trace lines and diagnostics go to stderr. Warnings are printed but only fail
/// the assembly in strict mode.
pub fn assemble_or_exit(args: &AssemblyArgs) -> Assembled {
    let lang = require_lang(&args.ext);
    let base = load_base(
        &lang,
        &args.base,
        args.binary_base,
        args.base_prec.as_deref(),
    )
    .unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    let assembler = Assembler::new(&base)
        .extension(lang.extension())
        .config(args.config());
    let result = match verbosity(args.verbose) {
        None => assembler.assemble(),
        Some(verbosity) => {
            let mut tracer = PrintTracer::new(verbosity, Colors::new(args.color));
            let result = assembler.tracer(&mut tracer).assemble();
            tracer.print();
            result
        }
    };

    match result {
        Ok(assembled) => {
            if !assembled.diagnostics().is_empty() {
                eprint!(
                    "{}",
                    assembled.diagnostics().printer().colored(args.color).render()
                );
            }
            assembled
        }
        Err(e) => {
            match e.diagnostics() {
                Some(diag) => eprint!("{}", diag.printer().colored(args.color).render()),
                None => eprintln!("error: {}", e),
            }
            std::process::exit(1);
        }
    }
}

/// Write `bytes` to `path`, or to stdout without one.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, bytes),
        None => io::Write::write_all(&mut io::stdout().lock(), bytes),
    }
}
