//! Graphviz rendering for automata.
//!
//! Left-to-right digraphs with circle nodes. Accept nodes get a second
//! periphery; edges carry their symbol, ε rendered as the Greek letter.

use crate::dfa::Dfa;
use crate::nfa::{Nfa, EPSILON};

/// Render an NFA as a Graphviz digraph. States keep their numeric ids.
pub fn nfa_to_dot(nfa: &Nfa) -> String {
    let mut out = String::new();
    out.push_str("digraph nfa {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=circle];\n");

    for state in 0..nfa.state_count() as u32 {
        if state == nfa.accept() {
            out.push_str(&format!("    {state} [peripheries=2];\n"));
        } else {
            out.push_str(&format!("    {state};\n"));
        }
    }

    for (from, symbol, to) in nfa.transitions() {
        let label = if symbol == EPSILON {
            "ε".to_owned()
        } else {
            symbol.to_string()
        };
        out.push_str(&format!("    {from} -> {to} [label=\"{label}\"];\n"));
    }

    out.push_str("}\n");
    out
}

/// Render a DFA as a Graphviz digraph. States are lettered `A`, `B`, … in
/// discovery order.
pub fn dfa_to_dot(dfa: &Dfa) -> String {
    let mut out = String::new();
    out.push_str("digraph dfa {\n");
    out.push_str("    rankdir=LR;\n");
    out.push_str("    node [shape=circle];\n");

    for index in 0..dfa.state_count() {
        if dfa.is_accepting(index) {
            out.push_str(&format!("    {} [peripheries=2];\n", state_name(index)));
        } else {
            out.push_str(&format!("    {};\n", state_name(index)));
        }
    }

    for state in 0..dfa.state_count() {
        for &symbol in dfa.alphabet() {
            if let Some(target) = dfa.target(state, symbol) {
                out.push_str(&format!(
                    "    {} -> {} [label=\"{symbol}\"];\n",
                    state_name(state),
                    state_name(target)
                ));
            }
        }
    }

    out.push_str("}\n");
    out
}

/// Discovery-order letter name: `A`, `B`, …, `Z`, `AA`, `AB`, …
fn state_name(index: usize) -> String {
    let mut name = String::new();
    let mut n = index;
    loop {
        name.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    name
}
