//! Tests for Thompson's construction.

use std::collections::BTreeSet;

use crate::nfa::{Nfa, EPSILON};
use crate::regex::{parse, RegexAst};
use crate::serialize::nfa_report;
use crate::thompson::build;

fn alphabet(symbols: &str) -> BTreeSet<char> {
    symbols.chars().collect()
}

fn build_regex(symbols: &str, expression: &str) -> Nfa {
    let alphabet = alphabet(symbols);
    let ast = parse(&alphabet, expression).unwrap();
    build(&ast, &alphabet).unwrap()
}

#[test]
fn symbol_machine_has_two_states_and_one_edge() {
    let nfa = build_regex("a", "a");

    assert_eq!(nfa.start(), 0);
    assert_eq!(nfa.accept(), 1);
    assert_eq!(nfa.targets(0, 'a'), [1]);
    assert_eq!(nfa.state_count(), 2);
}

#[test]
fn concatenation_joins_with_a_single_epsilon_edge() {
    let nfa = build_regex("ab", ".(a)(b)");

    insta::assert_snapshot!(nfa_report(&nfa), @r"
    NFA: 4 states, start 0, accept 3
    alphabet: a b
    0 -a-> 1
    1 -ε-> 2
    2 -b-> 3
    ");
}

#[test]
fn kleene_star_adds_skip_and_loop_edges() {
    let nfa = build_regex("a", "*(a)");

    insta::assert_snapshot!(nfa_report(&nfa), @r"
    NFA: 4 states, start 2, accept 3
    alphabet: a
    0 -a-> 1
    1 -ε-> 3
    1 -ε-> 0
    2 -ε-> 3
    2 -ε-> 0
    ");
}

#[test]
fn union_fans_out_and_back_in() {
    let nfa = build_regex("ab", "|(a)(b)");

    insta::assert_snapshot!(nfa_report(&nfa), @r"
    NFA: 6 states, start 4, accept 5
    alphabet: a b
    0 -a-> 1
    1 -ε-> 5
    2 -b-> 3
    3 -ε-> 5
    4 -ε-> 0
    4 -ε-> 2
    ");
}

#[test]
fn built_machines_respect_the_degree_bounds() {
    let nfa = build_regex("ab", ".(a)(*(|(a)(b)))");

    let mut outgoing: std::collections::BTreeMap<(u32, char), usize> = Default::default();
    for (from, symbol, _) in nfa.transitions() {
        *outgoing.entry((from, symbol)).or_default() += 1;
    }
    for ((_, symbol), count) in outgoing {
        let limit = if symbol == EPSILON { 2 } else { 1 };
        assert!(count <= limit);
    }
}

#[test]
fn accept_state_has_no_outgoing_transitions() {
    for expression in ["a", "*(a)", "|(a)(b)", ".(a)(b)", ".(a)(*(|(a)(b)))"] {
        let nfa = build_regex("ab", expression);
        let outgoing: Vec<_> = nfa
            .transitions()
            .filter(|&(from, _, _)| from == nfa.accept())
            .collect();
        assert!(outgoing.is_empty(), "accept leaks edges in {expression}");
    }
}

#[test]
fn operands_combine_right_then_left() {
    // .(a)(b) and .(b)(a) must produce mirrored machines, not the same one.
    let ab = build_regex("ab", ".(a)(b)");
    let ba = build_regex("ab", ".(b)(a)");

    assert_eq!(ab.targets(0, 'a'), [1]);
    assert_eq!(ba.targets(0, 'b'), [1]);
    assert_eq!(ba.targets(2, 'a'), [3]);
}

#[test]
fn build_accepts_a_handwritten_tree() {
    let ast = RegexAst::star(RegexAst::concat(
        RegexAst::Symbol('a'),
        RegexAst::Symbol('b'),
    ));
    let nfa = build(&ast, &alphabet("ab")).unwrap();

    // Inner concat spans states 0..=3, the star wraps with 4 and 5.
    assert_eq!(nfa.start(), 4);
    assert_eq!(nfa.accept(), 5);
    assert_eq!(nfa.state_count(), 6);
}
