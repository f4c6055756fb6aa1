use std::path::PathBuf;

use kaleido_automata::{dot, serialize, subset, Nfa};

use crate::util::{fail, read_input, write_output};

pub struct SubsetArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dot: bool,
}

/// NFA file → DFA: report on stdout, textual layout to the output file,
/// optionally a Graphviz rendering next to it.
pub fn run(args: SubsetArgs) {
    let text = read_input(&args.input);

    let nfa = Nfa::parse(&text).unwrap_or_else(|e| fail(e));
    let dfa = subset::determinize(&nfa);

    print!("{}", serialize::nfa_report(&nfa));
    print!("{}", serialize::dfa_report(&dfa));
    write_output(&args.output, &serialize::dfa_to_text(&dfa));

    if args.dot {
        let dot_path = args.output.with_extension("dot");
        write_output(&dot_path, &dot::dfa_to_dot(&dfa));
    }
}
