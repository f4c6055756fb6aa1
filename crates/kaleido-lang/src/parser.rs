//! Recursive-descent parser for the source language.
//!
//! Reports the first failure and stops; there is no recovery. Binary
//! operators are parsed by precedence climbing, loosest first:
//!
//! ```text
//! or  <  and  <  not  <  cmp (< > ==)  <  + -  <  * /
//! ```
//!
//! `if` in statement position is a statement conditional (else optional);
//! `if` in expression position is a value conditional (else required). A
//! bare expression at the top level is wrapped into an anonymous function so
//! the lowering driver only ever sees prototypes, functions, and globals.

use crate::ast::{
    Assign, BinOp, Binding, Block, Expr, ForStmt, FunctionDef, IfStmt, Init, Item, Program,
    Prototype, Stmt, UnOp,
};
use crate::lexer::{lex, token_text, Token, TokenKind};
use crate::ParseError;

/// Parse a whole translation unit.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        anon_count: 0,
    };
    parser.program()
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    anon_count: usize,
}

impl<'src> Parser<'src> {
    // ── token cursor ────────────────────────────────────────────────────

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn peek_second(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            let token = self.tokens[self.pos].clone();
            self.pos += 1;
            Ok(token)
        } else {
            Err(self.error(format!("expected {what}")))
        }
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.span.start)
            .unwrap_or(self.source.len())
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.offset(), message)
    }

    fn ident(&mut self, what: &str) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::Ident, what)?;
        Ok(token_text(self.source, &token).to_owned())
    }

    // ── items ───────────────────────────────────────────────────────────

    fn program(&mut self) -> Result<Program, ParseError> {
        let mut items = Vec::new();
        while self.peek().is_some() {
            items.push(self.item()?);
        }
        Ok(Program { items })
    }

    fn item(&mut self) -> Result<Item, ParseError> {
        match self.peek() {
            Some(TokenKind::KwExtern) => {
                self.bump();
                let proto = self.prototype()?;
                self.expect(TokenKind::Semi, "';' after extern declaration")?;
                Ok(Item::Extern(proto))
            }
            Some(TokenKind::KwDef) => {
                self.bump();
                let proto = self.prototype()?;
                let body = self.expr()?;
                self.expect(TokenKind::Semi, "';' after function body")?;
                Ok(Item::Function(FunctionDef { proto, body }))
            }
            Some(TokenKind::KwGlobal) => {
                self.bump();
                let name = self.ident("global variable name")?;
                self.expect(TokenKind::Semi, "';' after global declaration")?;
                Ok(Item::Global(name))
            }
            Some(_) => {
                // Bare top-level expression: wrap it in an anonymous function.
                let body = self.expr()?;
                self.expect(TokenKind::Semi, "';' after expression")?;
                let name = if self.anon_count == 0 {
                    "__anon_expr".to_owned()
                } else {
                    format!("__anon_expr{}", self.anon_count)
                };
                self.anon_count += 1;
                Ok(Item::Function(FunctionDef {
                    proto: Prototype {
                        name,
                        params: Vec::new(),
                    },
                    body,
                }))
            }
            None => Err(self.error("expected item")),
        }
    }

    fn prototype(&mut self) -> Result<Prototype, ParseError> {
        let name = self.ident("function name")?;
        self.expect(TokenKind::LParen, "'(' after function name")?;

        let mut params = Vec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                params.push(self.ident("parameter name")?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')' after parameters")?;
        Ok(Prototype { name, params })
    }

    // ── statements ──────────────────────────────────────────────────────

    fn block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut decls = Vec::new();
        while self.at(TokenKind::KwVar) {
            self.bump();
            decls.push(self.binding_tail()?);
            self.expect(TokenKind::Semi, "';' after declaration")?;
        }

        let mut stmts = vec![self.stmt()?];
        while self.eat(TokenKind::Semi) {
            if self.at(TokenKind::RBrace) {
                break;
            }
            stmts.push(self.stmt()?);
        }
        self.expect(TokenKind::RBrace, "'}' after block")?;

        Ok(Block { decls, stmts })
    }

    /// `name [= expr]`, the `var` keyword already consumed.
    fn binding_tail(&mut self) -> Result<Binding, ParseError> {
        let name = self.ident("variable name")?;
        let init = if self.eat(TokenKind::Assign) {
            Some(self.expr()?)
        } else {
            None
        };
        Ok(Binding { name, init })
    }

    fn stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek() {
            Some(TokenKind::KwVar) => {
                Err(self.error("declarations must precede the statements of a block"))
            }
            Some(TokenKind::KwIf) => Ok(Stmt::If(self.if_stmt()?)),
            Some(TokenKind::KwFor) => Ok(Stmt::For(self.for_stmt()?)),
            Some(TokenKind::Ident) if self.peek_second() == Some(TokenKind::Assign) => {
                Ok(Stmt::Assign(self.assign()?))
            }
            Some(_) => Ok(Stmt::Expr(self.expr()?)),
            None => Err(self.error("expected statement")),
        }
    }

    fn assign(&mut self) -> Result<Assign, ParseError> {
        let name = self.ident("variable name")?;
        self.expect(TokenKind::Assign, "'='")?;
        let value = self.expr()?;
        Ok(Assign { name, value })
    }

    fn if_stmt(&mut self) -> Result<IfStmt, ParseError> {
        self.expect(TokenKind::KwIf, "'if'")?;
        self.expect(TokenKind::LParen, "'(' after if")?;
        let cond = self.expr()?;
        self.expect(TokenKind::RParen, "')' after condition")?;
        let then_branch = Box::new(self.stmt()?);
        let else_branch = if self.eat(TokenKind::KwElse) {
            Some(Box::new(self.stmt()?))
        } else {
            None
        };
        Ok(IfStmt {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn for_stmt(&mut self) -> Result<ForStmt, ParseError> {
        self.expect(TokenKind::KwFor, "'for'")?;
        self.expect(TokenKind::LParen, "'(' after for")?;

        let init = if self.eat(TokenKind::KwVar) {
            Init::Binding(self.binding_tail()?)
        } else {
            Init::Assign(self.assign()?)
        };
        self.expect(TokenKind::Semi, "';' after loop initializer")?;
        let cond = self.expr()?;
        self.expect(TokenKind::Semi, "';' after loop condition")?;
        let step = self.assign()?;
        self.expect(TokenKind::RParen, "')' after loop step")?;
        let body = Box::new(self.stmt()?);

        Ok(ForStmt {
            init,
            cond,
            step,
            body,
        })
    }

    // ── expressions ─────────────────────────────────────────────────────

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.and_expr()?;
        while self.eat(TokenKind::KwOr) {
            let rhs = self.and_expr()?;
            lhs = binary(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.not_expr()?;
        while self.eat(TokenKind::KwAnd) {
            let rhs = self.not_expr()?;
            lhs = binary(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenKind::KwNot) {
            let operand = self.not_expr()?;
            Ok(Expr::Unary {
                op: UnOp::Not,
                operand: Box::new(operand),
            })
        } else {
            self.cmp_expr()
        }
    }

    fn cmp_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.add_expr()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Lt) => BinOp::Lt,
                Some(TokenKind::Gt) => BinOp::Gt,
                Some(TokenKind::EqEq) => BinOp::Eq,
                _ => break,
            };
            self.bump();
            let rhs = self.add_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn add_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.mul_expr()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.mul_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn mul_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.primary()?;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.primary()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(TokenKind::Number) => {
                let token = self.expect(TokenKind::Number, "number")?;
                let text = token_text(self.source, &token);
                let value: f64 = text
                    .parse()
                    .map_err(|_| ParseError::new(token.span.start, "invalid number literal"))?;
                Ok(Expr::Number(value))
            }
            Some(TokenKind::Ident) => {
                let name = self.ident("name")?;
                if self.eat(TokenKind::LParen) {
                    let mut args = Vec::new();
                    if !self.at(TokenKind::RParen) {
                        loop {
                            args.push(self.expr()?);
                            if !self.eat(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(TokenKind::RParen, "')' after call arguments")?;
                    Ok(Expr::Call { callee: name, args })
                } else {
                    Ok(Expr::VarRef(name))
                }
            }
            Some(TokenKind::LParen) => {
                self.bump();
                let inner = self.expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            Some(TokenKind::KwIf) => {
                self.bump();
                self.expect(TokenKind::LParen, "'(' after if")?;
                let cond = self.expr()?;
                self.expect(TokenKind::RParen, "')' after condition")?;
                let then_expr = self.expr()?;
                self.expect(TokenKind::KwElse, "'else' in if expression")?;
                let else_expr = self.expr()?;
                Ok(Expr::If {
                    cond: Box::new(cond),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                })
            }
            Some(TokenKind::LBrace) => Ok(Expr::Block(self.block()?)),
            _ => Err(self.error("expected expression")),
        }
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
