//! Lexer for the source language.
//!
//! Produces span-based tokens; text is sliced from the source only when the
//! parser needs it. `#` starts a comment that runs to end of line. The first
//! unrecognized character aborts lexing with a [`ParseError`].

use logos::Logos;
use std::ops::Range;

use crate::ParseError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"#[^\n]*")]
pub enum TokenKind {
    #[token("def")]
    KwDef,
    #[token("extern")]
    KwExtern,
    #[token("global")]
    KwGlobal,
    #[token("var")]
    KwVar,
    #[token("if")]
    KwIf,
    #[token("else")]
    KwElse,
    #[token("for")]
    KwFor,
    #[token("and")]
    KwAnd,
    #[token("or")]
    KwOr,
    #[token("not")]
    KwNot,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("=")]
    Assign,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Token: kind plus byte span into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Tokenize `source`, failing on the first unrecognized character.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                return Err(ParseError::new(
                    span.start,
                    format!("unexpected character {:?}", &source[span.clone()]),
                ));
            }
        }
    }
    Ok(tokens)
}

/// The text slice of a token. O(1) into the source.
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.clone()]
}
