//! Error taxonomy for the automata pipeline.

use crate::nfa::StateId;

/// Errors from loading, parsing, building, or determinizing automata.
///
/// The pipeline aborts on the first error; no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Leaf position holds a symbol outside the declared alphabet.
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(char),

    /// Operator position holds something other than `*`, `.`, `|`.
    #[error("unknown operator '{0}'")]
    UnknownOperator(char),

    /// Expression text is not well-formed prefix syntax.
    #[error("malformed expression '{0}'")]
    Malformed(String),

    /// Thompson assembly finished with a machine-stack height other than one.
    #[error("malformed expression: {0} partial machines left after assembly")]
    MalformedExpression(usize),

    /// Adding a transition would exceed the Thompson degree bounds.
    #[error("state {state} already has the maximum number of outgoing '{symbol}' transitions")]
    ThompsonInvariantViolated { state: StateId, symbol: char },

    /// A DFA state index outside the discovered-state range.
    #[error("state index {0} is out of range")]
    StateIndexOutOfRange(usize),

    /// Input text does not follow the documented file layout.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
