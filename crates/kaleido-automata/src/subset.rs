//! Subset construction: NFA → DFA.
//!
//! DFA states are ε-closures of NFA state sets. A worklist seeded with the
//! closure of the NFA start state is drained breadth-first; discovery order
//! fixes the state indexing, and the sorted NFA transition maps make that
//! order stable for a given input automaton.

use std::collections::{BTreeSet, VecDeque};

use crate::dfa::Dfa;
use crate::nfa::{Nfa, StateId, EPSILON};

/// All states reachable from `states` via ε-edges alone.
///
/// Queue-based BFS; the result always contains the seed states, and the
/// operation is idempotent.
pub fn epsilon_closure(nfa: &Nfa, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
    let mut closure = states.clone();
    let mut queue: VecDeque<StateId> = states.iter().copied().collect();

    while let Some(current) = queue.pop_front() {
        for &next in nfa.targets(current, EPSILON) {
            if closure.insert(next) {
                queue.push_back(next);
            }
        }
    }
    closure
}

/// Determinize `nfa`.
///
/// For each pending subset `Q` and non-ε symbol `a`, the move set
/// `⋃ {t | q ∈ Q, q -a-> t}` is ε-closed; empty results produce no
/// transition. A subset is accepting when it contains the NFA accept state.
pub fn determinize(nfa: &Nfa) -> Dfa {
    let symbols: Vec<char> = nfa.input_alphabet().collect();
    let start = epsilon_closure(nfa, &BTreeSet::from([nfa.start()]));

    let mut dfa = Dfa::new(symbols.iter().copied().collect(), start);
    let mut worklist: VecDeque<usize> = VecDeque::from([0]);

    while let Some(from) = worklist.pop_front() {
        let subset = dfa
            .state(from)
            .expect("worklist only holds interned indices")
            .clone();

        for &symbol in &symbols {
            let mut moved = BTreeSet::new();
            for &state in &subset {
                moved.extend(nfa.targets(state, symbol).iter().copied());
            }

            let closed = epsilon_closure(nfa, &moved);
            if closed.is_empty() {
                continue;
            }

            let (to, fresh) = dfa.intern(closed);
            dfa.add_transition(from, symbol, to);
            if fresh {
                worklist.push_back(to);
            }
        }
    }

    for index in 0..dfa.state_count() {
        let accepting = dfa
            .state(index)
            .expect("index bounded by state_count")
            .contains(&nfa.accept());
        if accepting {
            dfa.mark_accept(index);
        }
    }

    dfa
}
