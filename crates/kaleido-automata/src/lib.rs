//! Regex → NFA → DFA toolchain.
//!
//! Two stages share one automaton model:
//!
//! ```text
//! prefix regex text → RegexAst → Nfa (Thompson) → Dfa (subset construction)
//! ```
//!
//! Either stage can run stand-alone: [`regex::parse`] + [`thompson::build`]
//! turn an expression into an NFA, and [`Nfa::parse`] + [`subset::determinize`]
//! determinize an automaton read from its textual form. [`serialize`] and
//! [`dot`] render both automata as text and as Graphviz digraphs.
//!
//! # Example
//!
//! ```
//! use kaleido_automata::{regex, subset, thompson};
//!
//! let file = regex::RegexFile::parse("a b\n.(a)(*(|(a)(b)))\n").unwrap();
//! let ast = regex::parse(&file.alphabet, &file.expression).unwrap();
//! let nfa = thompson::build(&ast, &file.alphabet).unwrap();
//! let dfa = subset::determinize(&nfa);
//!
//! assert!(dfa.accepts("abab"));
//! assert!(!dfa.accepts("b"));
//! ```

pub mod dfa;
pub mod dot;
mod error;
pub mod nfa;
pub mod regex;
pub mod serialize;
pub mod subset;
pub mod thompson;

#[cfg(test)]
mod dot_tests;
#[cfg(test)]
mod serialize_tests;
#[cfg(test)]
mod thompson_tests;

pub use dfa::Dfa;
pub use error::Error;
pub use nfa::{Nfa, StateId, EPSILON};

/// Result type for automata operations.
pub type Result<T> = std::result::Result<T, Error>;
