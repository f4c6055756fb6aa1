//! Parser for the fully-parenthesized prefix regex form.
//!
//! Grammar: `E := sym | *(E) | .(E)(E) | |(E)(E)`. Whitespace is
//! insignificant. Operands are delimited by balanced parenthesis runs and are
//! recursed on with their parentheses still attached; a redundant outer paren
//! layer around a whole expression is unwrapped, so both `.(a)(b)` and
//! `(.(a)(b))` are accepted. A leaf is exactly `x` or `(x)`, nothing looser.

use std::collections::BTreeSet;

use super::RegexAst;
use crate::{Error, Result};

/// Parse `text` over `alphabet` into a syntax tree.
pub fn parse(alphabet: &BTreeSet<char>, text: &str) -> Result<RegexAst> {
    let compact: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    parse_expr(alphabet, &compact)
}

fn parse_expr(alphabet: &BTreeSet<char>, expr: &[char]) -> Result<RegexAst> {
    match expr {
        [] => Err(Error::Malformed(String::new())),
        [symbol] => leaf(alphabet, *symbol),
        ['(', symbol, ')'] => leaf(alphabet, *symbol),
        ['(', ..] => {
            // Redundant outer parens: unwrap when the run spans the input.
            let run = balanced_run(expr, 0)?;
            if run != expr.len() {
                return Err(Error::Malformed(render(expr)));
            }
            parse_expr(alphabet, &expr[1..expr.len() - 1])
        }
        ['*', '(', ..] => {
            let run = balanced_run(expr, 1)?;
            if 1 + run != expr.len() {
                return Err(Error::Malformed(render(expr)));
            }
            let inner = parse_expr(alphabet, &expr[1..1 + run])?;
            Ok(RegexAst::star(inner))
        }
        [op @ ('.' | '|'), '(', ..] => {
            let first = balanced_run(expr, 1)?;
            let after = 1 + first;
            if expr.get(after) != Some(&'(') {
                return Err(Error::Malformed(render(expr)));
            }
            let second = balanced_run(expr, after)?;
            if after + second != expr.len() {
                return Err(Error::Malformed(render(expr)));
            }

            let left = parse_expr(alphabet, &expr[1..after])?;
            let right = parse_expr(alphabet, &expr[after..after + second])?;
            Ok(match op {
                '.' => RegexAst::concat(left, right),
                _ => RegexAst::union(left, right),
            })
        }
        ['*' | '.' | '|', ..] => Err(Error::Malformed(render(expr))),
        [op, ..] => Err(Error::UnknownOperator(*op)),
    }
}

fn leaf(alphabet: &BTreeSet<char>, symbol: char) -> Result<RegexAst> {
    if alphabet.contains(&symbol) {
        Ok(RegexAst::Symbol(symbol))
    } else {
        Err(Error::UnknownSymbol(symbol))
    }
}

/// Length of the balanced parenthesis run starting at `start`, parens
/// included. Fails when the scan walks off the end of the input.
fn balanced_run(expr: &[char], start: usize) -> Result<usize> {
    debug_assert_eq!(expr.get(start), Some(&'('));
    let mut depth = 1usize;
    let mut pos = start + 1;

    while depth > 0 {
        match expr.get(pos) {
            Some('(') => depth += 1,
            Some(')') => depth -= 1,
            Some(_) => {}
            None => return Err(Error::Malformed(render(expr))),
        }
        pos += 1;
    }
    Ok(pos - start)
}

fn render(expr: &[char]) -> String {
    expr.iter().collect()
}
