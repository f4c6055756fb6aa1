//! Tests for Graphviz rendering.

use std::collections::BTreeSet;

use crate::dot::{dfa_to_dot, nfa_to_dot};
use crate::nfa::Nfa;
use crate::regex::parse;
use crate::subset::determinize;
use crate::thompson::build;

fn build_regex(symbols: &str, expression: &str) -> Nfa {
    let alphabet: BTreeSet<char> = symbols.chars().collect();
    let ast = parse(&alphabet, expression).unwrap();
    build(&ast, &alphabet).unwrap()
}

#[test]
fn nfa_digraph_marks_the_accept_state() {
    let nfa = build_regex("ab", ".(a)(b)");

    insta::assert_snapshot!(nfa_to_dot(&nfa), @r#"
    digraph nfa {
        rankdir=LR;
        node [shape=circle];
        0;
        1;
        2;
        3 [peripheries=2];
        0 -> 1 [label="a"];
        1 -> 2 [label="ε"];
        2 -> 3 [label="b"];
    }
    "#);
}

#[test]
fn dfa_digraph_letters_states_in_discovery_order() {
    let dfa = determinize(&build_regex("ab", ".(a)(b)"));

    insta::assert_snapshot!(dfa_to_dot(&dfa), @r#"
    digraph dfa {
        rankdir=LR;
        node [shape=circle];
        A;
        B;
        C [peripheries=2];
        A -> B [label="a"];
        B -> C [label="b"];
    }
    "#);
}

#[test]
fn star_digraph_labels_epsilon_edges() {
    let nfa = build_regex("a", "*(a)");
    let dot = nfa_to_dot(&nfa);

    assert!(dot.contains("2 -> 3 [label=\"ε\"]"));
    assert!(dot.contains("2 -> 0 [label=\"ε\"]"));
    assert!(dot.contains("0 -> 1 [label=\"a\"]"));
    assert!(dot.contains("3 [peripheries=2]"));
}
