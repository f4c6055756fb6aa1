//! Two-line regex input: an alphabet, then a prefix expression.

use std::collections::BTreeSet;

use crate::{Error, Result};

/// A regular expression paired with its alphabet, as read from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexFile {
    pub alphabet: BTreeSet<char>,
    pub expression: String,
}

impl RegexFile {
    /// Parse the two-line layout: whitespace-separated single-character
    /// alphabet symbols, then the expression verbatim.
    ///
    /// Symbols must be ASCII alphanumeric so they stay disjoint from the
    /// operators and from the ε sentinel.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let alphabet_line = lines
            .next()
            .ok_or_else(|| Error::MalformedInput("missing alphabet line".into()))?;
        let expression = lines
            .next()
            .ok_or_else(|| Error::MalformedInput("missing expression line".into()))?
            .to_owned();

        let mut alphabet = BTreeSet::new();
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
        if alphabet.is_empty() {
            return Err(Error::MalformedInput("alphabet is empty".into()));
        }

        Ok(Self {
            alphabet,
            expression,
        })
    }
}
