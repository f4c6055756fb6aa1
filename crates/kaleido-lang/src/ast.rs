//! Owned AST for the source language.
//!
//! Tagged variants with exclusive ownership: each node owns its children,
//! the root owns the whole tree, and dropping a [`Program`] releases
//! everything. No sharing, no cycles.

use std::fmt::Write;

/// A whole translation unit: top-level items in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `extern name(params);` with no body.
    Extern(Prototype),
    /// `def name(params) body;`
    Function(FunctionDef),
    /// `global name;`: a module-level mutable float, zero-initialized.
    Global(String),
}

/// Function signature: float parameters, float result.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub proto: Prototype,
    pub body: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Eq => "==",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Immutable numeric leaf.
    Number(f64),
    /// Name lookup: local slot first, then module globals.
    VarRef(String),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    /// Value-producing conditional; both branches are required.
    If {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Block(Block),
}

/// `{ decls; stmts }`: declarations first, then at least one statement.
/// The block's value is the last statement's value.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub decls: Vec<Binding>,
    pub stmts: Vec<Stmt>,
}

/// `var name [= init]`; a missing init defaults to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub init: Option<Expr>,
}

/// `name = expr`: stores into a local slot or a global.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Assign(Assign),
    If(IfStmt),
    For(ForStmt),
}

/// Statement conditional; the else branch may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

/// Loop initializer: a fresh scoped binding or a plain assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    Binding(Binding),
    Assign(Assign),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Init,
    pub cond: Expr,
    pub step: Assign,
    pub body: Box<Stmt>,
}

/// Indented tree dump, for tests and debugging.
pub fn format_program(program: &Program) -> String {
    let mut out = String::new();
    for item in &program.items {
        format_item(item, 0, &mut out);
    }
    out
}

fn indent(depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
}

fn format_item(item: &Item, depth: usize, out: &mut String) {
    indent(depth, out);
    match item {
        Item::Extern(proto) => {
            let _ = writeln!(out, "Extern {}({})", proto.name, proto.params.join(", "));
        }
        Item::Function(def) => {
            let _ = writeln!(
                out,
                "Function {}({})",
                def.proto.name,
                def.proto.params.join(", ")
            );
            format_expr(&def.body, depth + 1, out);
        }
        Item::Global(name) => {
            let _ = writeln!(out, "Global {name}");
        }
    }
}

fn format_expr(expr: &Expr, depth: usize, out: &mut String) {
    indent(depth, out);
    match expr {
        Expr::Number(value) => {
            let _ = writeln!(out, "Number {value}");
        }
        Expr::VarRef(name) => {
            let _ = writeln!(out, "VarRef {name}");
        }
        Expr::Binary { op, lhs, rhs } => {
            let _ = writeln!(out, "Binary {}", op.symbol());
            format_expr(lhs, depth + 1, out);
            format_expr(rhs, depth + 1, out);
        }
        Expr::Unary { op: UnOp::Not, operand } => {
            let _ = writeln!(out, "Not");
            format_expr(operand, depth + 1, out);
        }
        Expr::Call { callee, args } => {
            let _ = writeln!(out, "Call {callee}");
            for arg in args {
                format_expr(arg, depth + 1, out);
            }
        }
        Expr::If {
            cond,
            then_expr,
            else_expr,
        } => {
            let _ = writeln!(out, "IfExpr");
            format_expr(cond, depth + 1, out);
            format_expr(then_expr, depth + 1, out);
            format_expr(else_expr, depth + 1, out);
        }
        Expr::Block(block) => format_block(block, depth, out),
    }
}

fn format_block(block: &Block, depth: usize, out: &mut String) {
    let _ = writeln!(out, "Block");
    for binding in &block.decls {
        format_binding(binding, depth + 1, out);
    }
    for stmt in &block.stmts {
        format_stmt(stmt, depth + 1, out);
    }
}

fn format_binding(binding: &Binding, depth: usize, out: &mut String) {
    indent(depth, out);
    let _ = writeln!(out, "Binding {}", binding.name);
    if let Some(init) = &binding.init {
        format_expr(init, depth + 1, out);
    }
}

fn format_stmt(stmt: &Stmt, depth: usize, out: &mut String) {
    match stmt {
        Stmt::Expr(expr) => format_expr(expr, depth, out),
        Stmt::Assign(assign) => {
            indent(depth, out);
            let _ = writeln!(out, "Assign {}", assign.name);
            format_expr(&assign.value, depth + 1, out);
        }
        Stmt::If(if_stmt) => {
            indent(depth, out);
            let _ = writeln!(out, "IfStmt");
            format_expr(&if_stmt.cond, depth + 1, out);
            format_stmt(&if_stmt.then_branch, depth + 1, out);
            if let Some(else_branch) = &if_stmt.else_branch {
                format_stmt(else_branch, depth + 1, out);
            }
        }
        Stmt::For(for_stmt) => {
            indent(depth, out);
            let _ = writeln!(out, "For");
            match &for_stmt.init {
                Init::Binding(binding) => format_binding(binding, depth + 1, out),
                Init::Assign(assign) => {
                    indent(depth + 1, out);
                    let _ = writeln!(out, "Assign {}", assign.name);
                    format_expr(&assign.value, depth + 2, out);
                }
            }
            format_expr(&for_stmt.cond, depth + 1, out);
            indent(depth + 1, out);
            let _ = writeln!(out, "Step {}", for_stmt.step.name);
            format_expr(&for_stmt.step.value, depth + 2, out);
            format_stmt(&for_stmt.body, depth + 1, out);
        }
    }
}
