//! Tests for textual serialization.

use std::collections::BTreeSet;

use indoc::indoc;

use crate::nfa::Nfa;
use crate::regex::parse;
use crate::serialize::{dfa_report, dfa_to_text, nfa_report, nfa_to_text};
use crate::subset::determinize;
use crate::thompson::build;

fn build_regex(symbols: &str, expression: &str) -> Nfa {
    let alphabet: BTreeSet<char> = symbols.chars().collect();
    let ast = parse(&alphabet, expression).unwrap();
    build(&ast, &alphabet).unwrap()
}

#[test]
fn nfa_text_layout_is_row_major_with_epsilon_rows_first() {
    let nfa = build_regex("ab", ".(a)(b)");

    // Per state: ε row, then 'a', then 'b'.
    assert_eq!(
        nfa_to_text(&nfa),
        indoc! {"
            a b
            3

            1

            2




            3



        "}
    );
}

#[test]
fn nfa_text_round_trips_through_the_importer() {
    for expression in ["a", "*(a)", "|(a)(b)", ".(a)(*(|(a)(b)))"] {
        let nfa = build_regex("ab", expression);
        let text = nfa_to_text(&nfa);
        let imported = Nfa::parse(&text).unwrap();

        assert_eq!(imported.start(), nfa.start(), "start for {expression}");
        assert_eq!(imported.accept(), nfa.accept(), "accept for {expression}");
        assert_eq!(nfa_to_text(&imported), text, "layout for {expression}");
    }
}

#[test]
fn dfa_text_prints_a_row_for_every_state_symbol_pair() {
    let dfa = determinize(&build_regex("ab", ".(a)(b)"));

    // Subsets, accept indices, then 3 states x 2 symbols transition rows.
    // Missing transitions still get their (empty) line.
    assert_eq!(
        dfa_to_text(&dfa),
        indoc! {"
            0
            1 2
            3
            2
            1


            2


        "}
    );
}

#[test]
fn nfa_report_summarizes_the_machine() {
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
fn dfa_report_lists_subsets_and_accept_marks() {
    let dfa = determinize(&build_regex("ab", ".(a)(b)"));

    insta::assert_snapshot!(dfa_report(&dfa), @r"
    DFA: 3 states, start 0
    alphabet: a b
    0: {0}
    1: {1 2}
    2: {3} (accept)
    0 -a-> 1
    1 -b-> 2
    ");
}
