//! Front end for a small expression-and-statement language.
//!
//! Source text is lexed and parsed into an owned AST, then lowered to an
//! SSA-form IR of basic blocks and φ-nodes:
//!
//! ```text
//! source → lexer → parser → ast::Program → lower → ir::Module
//! ```
//!
//! Every function lowers to float-typed SSA with stack slots for mutable
//! variables, allocated in the entry block so they dominate all uses. The
//! [`ir`] module carries its own structural verifier and textual printer.
//!
//! # Example
//!
//! ```
//! use kaleido_lang::{lower, parser};
//!
//! let program = parser::parse("def inc(x) x + 1;").unwrap();
//! let module = lower::lower(&program).unwrap();
//! assert!(module.function("inc").is_some());
//! ```

pub mod ast;
mod error;
pub mod ir;
pub mod lexer;
pub mod lower;
pub mod parser;

pub use error::{CodegenError, ParseError};
pub use lower::lower;
