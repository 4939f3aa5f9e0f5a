use super::loader::{AssemblyArgs, assemble_or_exit};

pub struct CheckArgs {
    pub assembly: AssemblyArgs,
}

pub fn run(args: CheckArgs) {
    assemble_or_exit(&args.assembly);

    // Silent on success (like cargo check)
}
