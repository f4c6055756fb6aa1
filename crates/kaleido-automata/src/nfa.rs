//! Nondeterministic finite automata.
//!
//! One model serves both producers: automata assembled by Thompson's
//! construction and automata imported from the textual layout. Transitions
//! are a multimap from `(state, symbol)` to target states, where the symbol
//! may be the ε sentinel. Sorted containers keep every serialized layout
//! stable.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Error, Result};

/// Opaque state identifier, unique within one automaton.
///
/// Both construction paths produce dense ids starting at zero, so serialized
/// layouts can iterate `0..state_count`.
pub type StateId = u32;

/// Sentinel standing in for ε in alphabets and transition keys.
///
/// Non-alphanumeric, so it is disjoint from every valid alphabet, and it
/// sorts before every alphabet symbol, which fixes the position of the ε row
/// in the serialized layouts. Rendered as `ε` in human-facing output.
pub const EPSILON: char = '*';

/// An NFA with a single start state and a single accept state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    /// Alphabet including the ε sentinel.
    alphabet: BTreeSet<char>,
    start: StateId,
    accept: StateId,
    transitions: BTreeMap<(StateId, char), Vec<StateId>>,
    /// One past the highest state id seen; ids are dense from zero.
    state_count: usize,
}

impl Nfa {
    /// Create an automaton over `alphabet` (ε is added) with no transitions.
    pub fn new(alphabet: BTreeSet<char>, start: StateId, accept: StateId) -> Self {
        let mut nfa = Self {
            alphabet,
            start,
            accept,
            transitions: BTreeMap::new(),
            state_count: 0,
        };
        nfa.alphabet.insert(EPSILON);
        nfa.record_state(start);
        nfa.record_state(accept);
        nfa
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// Full alphabet, ε included, in sorted order (ε first).
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Alphabet without ε, in sorted order.
    pub fn input_alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied().filter(|&c| c != EPSILON)
    }

    /// Number of states, assuming dense ids from zero.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Insert a transition, enforcing the Thompson degree bounds: at most two
    /// outgoing ε-edges per state, at most one outgoing edge per alphabet
    /// symbol per state.
    pub fn add_transition(&mut self, from: StateId, symbol: char, to: StateId) -> Result<()> {
        let targets = self.transitions.entry((from, symbol)).or_default();
        let limit = if symbol == EPSILON { 2 } else { 1 };
        if targets.len() >= limit {
            return Err(Error::ThompsonInvariantViolated {
                state: from,
                symbol,
            });
        }
        targets.push(to);
        self.record_state(from);
        self.record_state(to);
        Ok(())
    }

    /// Targets of `(from, symbol)`, in insertion order. Empty when absent.
    pub fn targets(&self, from: StateId, symbol: char) -> &[StateId] {
        self.transitions
            .get(&(from, symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All transitions as `(from, symbol, to)`, sorted by `(from, symbol)`.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(from, symbol), targets)| {
                targets.iter().map(move |&to| (from, symbol, to))
            })
    }

    /// Copy every transition of `other` into `self`, re-checked.
    ///
    /// Used by the Thompson combinators; the state sets are disjoint by
    /// construction, so the degree bounds cannot newly trip.
    pub fn absorb(&mut self, other: &Nfa) -> Result<()> {
        for (from, symbol, to) in other.transitions() {
            self.add_transition(from, symbol, to)?;
        }
        Ok(())
    }

    fn record_state(&mut self, state: StateId) {
        self.state_count = self.state_count.max(state as usize + 1);
    }

    /// Parse the textual layout:
    ///
    /// ```text
    /// line 1:  alphabet symbols, whitespace-separated
    /// line 2:  accept state id
    /// rest:    one row per (state, symbol), states ascending, symbols in
    ///          sorted order with the ε row first; each row lists target
    ///          ids, an empty row meaning no transition
    /// ```
    ///
    /// The start state is inferred as the first state that never appears as
    /// a transition target. Imported automata are general NFAs: the Thompson
    /// degree bounds are not imposed here.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let alphabet_line = lines
            .next()
            .ok_or_else(|| Error::MalformedInput("missing alphabet line".into()))?;
        let accept_line = lines
            .next()
            .ok_or_else(|| Error::MalformedInput("missing accept state line".into()))?;

        let mut alphabet = BTreeSet::from([EPSILON]);
        for token in alphabet_line.split_whitespace() {
            let mut chars = token.chars();
            let (Some(symbol), None) = (chars.next(), chars.next()) else {
                return Err(Error::MalformedInput(format!(
                    "alphabet symbol '{token}' is not a single character"
                )));
            };
            if !symbol.is_ascii_alphanumeric() {
                return Err(Error::MalformedInput(format!(
                    "alphabet symbol '{symbol}' is not alphanumeric"
                )));
            }
            alphabet.insert(symbol);
        }

        let accept: StateId = accept_line
            .trim()
            .parse()
            .map_err(|_| Error::MalformedInput(format!("invalid accept state '{accept_line}'")))?;

        // Row-major transition rows: symbols cycle in sorted order (ε first),
        // the state advances after each full cycle. A truncated final cycle
        // reads as empty rows.
        let symbols: Vec<char> = alphabet.iter().copied().collect();
        let mut transitions: BTreeMap<(StateId, char), Vec<StateId>> = BTreeMap::new();
        let mut state_count = 0usize;

        for (row, line) in lines.enumerate() {
            let state = (row / symbols.len()) as StateId;
            let symbol = symbols[row % symbols.len()];
            state_count = state_count.max(state as usize + 1);

            for token in line.split_whitespace() {
                let target: StateId = token.parse().map_err(|_| {
                    Error::MalformedInput(format!("invalid target state '{token}'"))
                })?;
                transitions.entry((state, symbol)).or_default().push(target);
                state_count = state_count.max(target as usize + 1);
            }
        }

        let start = infer_start(&transitions)?;

        Ok(Self {
            alphabet,
            start,
            accept,
            transitions,
            state_count,
        })
    }
}

/// The start state of an imported automaton: the first source state that
/// never appears as a transition target.
fn infer_start(transitions: &BTreeMap<(StateId, char), Vec<StateId>>) -> Result<StateId> {
    let mut sources = BTreeSet::new();
    let mut targets = BTreeSet::new();
    for (&(from, _), tos) in transitions {
        sources.insert(from);
        targets.extend(tos.iter().copied());
    }

    sources
        .into_iter()
        .find(|state| !targets.contains(state))
        .ok_or_else(|| Error::MalformedInput("cannot infer a start state".into()))
}
