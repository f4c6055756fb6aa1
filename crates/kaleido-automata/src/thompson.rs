//! Thompson's construction: regex syntax tree → NFA.
//!
//! The tree is flattened to a post-order node list and folded over a stack
//! of partial machines: leaves push elementary symbol machines, operators
//! pop their operands and push the combined machine. For the binary
//! operators the pop order is right-then-left: the left operand was visited
//! first, so its machine sits deeper in the stack. Fresh state ids come from
//! a counter owned by the builder, keeping every partial machine disjoint
//! from every other.

use std::collections::BTreeSet;

use crate::nfa::{Nfa, StateId, EPSILON};
use crate::regex::RegexAst;
use crate::{Error, Result};

/// Build an NFA recognizing `ast` over `alphabet`.
///
/// Exactly one machine must remain on the working stack at the end;
/// anything else is [`Error::MalformedExpression`].
pub fn build(ast: &RegexAst, alphabet: &BTreeSet<char>) -> Result<Nfa> {
    let mut builder = Builder::new(alphabet.clone());
    let mut machines: Vec<Nfa> = Vec::new();

    for node in ast.post_order() {
        let machine = match node {
            RegexAst::Symbol(symbol) => builder.symbol(*symbol)?,
            RegexAst::Star(_) => {
                let inner = pop(&mut machines)?;
                builder.kleene_star(inner)?
            }
            RegexAst::Concat(..) => {
                let right = pop(&mut machines)?;
                let left = pop(&mut machines)?;
                builder.concatenation(left, right)?
            }
            RegexAst::Union(..) => {
                let right = pop(&mut machines)?;
                let left = pop(&mut machines)?;
                builder.union(left, right)?
            }
        };
        machines.push(machine);
    }

    let Some(nfa) = machines.pop() else {
        return Err(Error::MalformedExpression(0));
    };
    if !machines.is_empty() {
        return Err(Error::MalformedExpression(machines.len() + 1));
    }
    Ok(nfa)
}

fn pop(machines: &mut Vec<Nfa>) -> Result<Nfa> {
    machines.pop().ok_or(Error::MalformedExpression(0))
}

/// Pool of elementary machines sharing one state counter.
struct Builder {
    alphabet: BTreeSet<char>,
    next_state: StateId,
}

impl Builder {
    fn new(alphabet: BTreeSet<char>) -> Self {
        Self {
            alphabet,
            next_state: 0,
        }
    }

    fn fresh_pair(&mut self) -> (StateId, StateId) {
        let start = self.next_state;
        self.next_state += 2;
        (start, start + 1)
    }

    /// Two fresh states joined by a single `symbol` edge.
    fn symbol(&mut self, symbol: char) -> Result<Nfa> {
        let (start, accept) = self.fresh_pair();
        let mut nfa = Nfa::new(self.alphabet.clone(), start, accept);
        nfa.add_transition(start, symbol, accept)?;
        Ok(nfa)
    }

    /// Kleene star: fresh endpoints around `inner`, four ε-edges.
    ///
    /// ```text
    ///        ┌───ε───────────────┐
    /// s ──ε──► inner.start … inner.accept ──ε──► f
    /// │                    ◄──ε──┘               ▲
    /// └───────────────ε──────────────────────────┘
    /// ```
    fn kleene_star(&mut self, inner: Nfa) -> Result<Nfa> {
        let (start, accept) = self.fresh_pair();
        let mut nfa = Nfa::new(self.alphabet.clone(), start, accept);
        nfa.absorb(&inner)?;
        nfa.add_transition(start, EPSILON, accept)?;
        nfa.add_transition(start, EPSILON, inner.start())?;
        nfa.add_transition(inner.accept(), EPSILON, accept)?;
        nfa.add_transition(inner.accept(), EPSILON, inner.start())?;
        Ok(nfa)
    }

    /// Union: fresh endpoints fanning out to both operands and back in.
    fn union(&mut self, left: Nfa, right: Nfa) -> Result<Nfa> {
        let (start, accept) = self.fresh_pair();
        let mut nfa = Nfa::new(self.alphabet.clone(), start, accept);
        nfa.absorb(&left)?;
        nfa.absorb(&right)?;
        nfa.add_transition(start, EPSILON, left.start())?;
        nfa.add_transition(start, EPSILON, right.start())?;
        nfa.add_transition(left.accept(), EPSILON, accept)?;
        nfa.add_transition(right.accept(), EPSILON, accept)?;
        Ok(nfa)
    }

    /// Concatenation: no fresh states, one ε-edge joining the operands.
    fn concatenation(&mut self, left: Nfa, right: Nfa) -> Result<Nfa> {
        let mut nfa = Nfa::new(self.alphabet.clone(), left.start(), right.accept());
        nfa.absorb(&left)?;
        nfa.absorb(&right)?;
        nfa.add_transition(left.accept(), EPSILON, right.start())?;
        Ok(nfa)
    }
}
