//! Error taxonomy for parsing and lowering.

/// First-failure syntax error, located by byte offset into the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Errors raised while lowering the AST to IR.
///
/// The first error aborts the whole lowering; nothing half-emitted survives
/// (a function that fails mid-body or fails verification is erased from the
/// module).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    /// Name is neither a local slot nor a module global.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// Call target has no declaration or definition.
    #[error("undefined function: {0}")]
    UndefinedFunction(String),

    /// Call argument count differs from the declared parameter count.
    #[error("function {name} expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Operator with no IR counterpart.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// A second definition for an already-defined function name.
    #[error("duplicate definition: {0}")]
    DuplicateDefinition(String),

    /// The structural verifier rejected the lowered function.
    #[error("verification of {name} failed: {reason}")]
    VerificationFailed { name: String, reason: String },
}
