mod cli;
mod commands;

use cli::{
    BuildParams, CheckParams, DumpParams, ExtensionsParams, ExternalsParams, GenerateParams,
    build_cli,
};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("build", m)) => {
            let params = BuildParams::from_matches(m);
            commands::build::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("externals", m)) => {
            let params = ExternalsParams::from_matches(m);
            commands::externals::run(params.into());
        }
        Some(("extensions", m)) => {
            let _params = ExtensionsParams::from_matches(m);
            commands::extensions::run();
        }
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
