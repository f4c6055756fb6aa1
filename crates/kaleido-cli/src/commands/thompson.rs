use std::path::PathBuf;

use kaleido_automata::{dot, regex, serialize, thompson};

use crate::util::{fail, read_input, write_output};

pub struct ThompsonArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dot: bool,
}

/// Regex file → NFA: report on stdout, textual layout to the output file,
/// optionally a Graphviz rendering next to it.
pub fn run(args: ThompsonArgs) {
    let text = read_input(&args.input);

    let file = regex::RegexFile::parse(&text).unwrap_or_else(|e| fail(e));
    let ast = regex::parse(&file.alphabet, &file.expression).unwrap_or_else(|e| fail(e));
    let nfa = thompson::build(&ast, &file.alphabet).unwrap_or_else(|e| fail(e));

    print!("{}", serialize::nfa_report(&nfa));
    write_output(&args.output, &serialize::nfa_to_text(&nfa));

    if args.dot {
        let dot_path = args.output.with_extension("dot");
        write_output(&dot_path, &dot::nfa_to_dot(&nfa));
    }
}
