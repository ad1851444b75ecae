//! Token types produced by the scanner and consumed by the parser and
//! evaluator.

use std::fmt;
use std::sync::Arc;

use rpncalc_types::{Operation, Span, VariableId};

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The operation carried by this token, if any.
    pub fn operation(&self) -> Option<&Arc<Operation>> {
        match &self.kind {
            TokenKind::Operation(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A numeric literal or a resolved constant.
    Number(f64),
    /// A reference to a session variable.
    Variable(VariableId),
    /// A function, operator or bracket.
    Operation(Arc<Operation>),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Variable(id) => write!(f, "{id}"),
            TokenKind::Operation(op) => f.write_str(op.designation()),
        }
    }
}
