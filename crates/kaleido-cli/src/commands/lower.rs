use std::path::PathBuf;

use kaleido_lang::ir::print_module;
use kaleido_lang::{lower, parser};

use crate::util::{fail, read_input};

pub struct LowerArgs {
    pub input: PathBuf,
}

/// Source file → SSA IR on stdout.
pub fn run(args: LowerArgs) {
    let text = read_input(&args.input);

    let program = parser::parse(&text).unwrap_or_else(|e| fail(e));
    let module = lower(&program).unwrap_or_else(|e| fail(e));

    print!("{}", print_module(&module));
}
