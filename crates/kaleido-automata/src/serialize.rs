//! Textual serialization for automata.
//!
//! The `*_to_text` functions produce the machine-readable row-major layouts
//! (the NFA form is exactly what [`Nfa::parse`] consumes); the `*_report`
//! functions produce human-readable summaries printed by the CLI.

use crate::dfa::Dfa;
use crate::nfa::{Nfa, EPSILON};

fn display_symbol(symbol: char) -> String {
    if symbol == EPSILON {
        "ε".to_owned()
    } else {
        symbol.to_string()
    }
}

/// Machine-readable NFA layout: alphabet (ε stripped), accept state, then
/// one row per (state, symbol), ε row first, listing target ids. A missing
/// transition prints an empty row.
pub fn nfa_to_text(nfa: &Nfa) -> String {
    let mut out = String::new();

    let alphabet: Vec<String> = nfa.input_alphabet().map(String::from).collect();
    out.push_str(&alphabet.join(" "));
    out.push('\n');

    out.push_str(&nfa.accept().to_string());
    out.push('\n');

    for state in 0..nfa.state_count() as u32 {
        for &symbol in nfa.alphabet() {
            let targets: Vec<String> = nfa
                .targets(state, symbol)
                .iter()
                .map(|t| t.to_string())
                .collect();
            out.push_str(&targets.join(" "));
            out.push('\n');
        }
    }
    out
}

/// Machine-readable DFA layout: one row per state listing its NFA-subset
/// members, one row of accept-state indices, then one row per
/// (state, symbol) pair with the target index; every pair gets its row,
/// empty when the transition is missing.
pub fn dfa_to_text(dfa: &Dfa) -> String {
    let mut out = String::new();

    for subset in dfa.states() {
        let members: Vec<String> = subset.iter().map(|s| s.to_string()).collect();
        out.push_str(&members.join(" "));
        out.push('\n');
    }

    let accept: Vec<String> = dfa.accept_indices().iter().map(|i| i.to_string()).collect();
    out.push_str(&accept.join(" "));
    out.push('\n');

    for state in 0..dfa.state_count() {
        for &symbol in dfa.alphabet() {
            if let Some(target) = dfa.target(state, symbol) {
                out.push_str(&target.to_string());
            }
            out.push('\n');
        }
    }
    out
}

/// Human-readable NFA summary: header, alphabet, grouped transitions.
pub fn nfa_report(nfa: &Nfa) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "NFA: {} states, start {}, accept {}\n",
        nfa.state_count(),
        nfa.start(),
        nfa.accept()
    ));

    let alphabet: Vec<String> = nfa.input_alphabet().map(String::from).collect();
    out.push_str(&format!("alphabet: {}\n", alphabet.join(" ")));

    for (from, symbol, to) in nfa.transitions() {
        out.push_str(&format!("{from} -{}-> {to}\n", display_symbol(symbol)));
    }
    out
}

/// Human-readable DFA summary: states with their subsets and accept marks,
/// then transitions.
pub fn dfa_report(dfa: &Dfa) -> String {
    let mut out = String::new();

    out.push_str(&format!("DFA: {} states, start 0\n", dfa.state_count()));

    let alphabet: Vec<String> = dfa.alphabet().iter().map(|c| c.to_string()).collect();
    out.push_str(&format!("alphabet: {}\n", alphabet.join(" ")));

    for (index, subset) in dfa.states().enumerate() {
        let members: Vec<String> = subset.iter().map(|s| s.to_string()).collect();
        let marker = if dfa.is_accepting(index) {
            " (accept)"
        } else {
            ""
        };
        out.push_str(&format!("{index}: {{{}}}{marker}\n", members.join(" ")));
    }

    for state in 0..dfa.state_count() {
        for &symbol in dfa.alphabet() {
            if let Some(target) = dfa.target(state, symbol) {
                out.push_str(&format!("{state} -{symbol}-> {target}\n"));
            }
        }
    }
    out
}
