use crate::registry::{Conflict, Table};
use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Registry,
    Scan,
    Syntax,
    Evaluation,
    Domain,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::Scan => write!(f, "scan"),
            Self::Syntax => write!(f, "syntax"),
            Self::Evaluation => write!(f, "evaluation"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

/// Numeric error code (E100–E599).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Registry errors (E100–E199) ──
    pub const INCOMPATIBLE_REGISTRY: Self = Self(100);

    // ── Scan errors (E200–E299) ──
    pub const INVALID_NUMBER: Self = Self(200);
    pub const UNKNOWN_OPERATOR: Self = Self(201);

    // ── Syntax errors (E300–E399) ──
    pub const UNEXPECTED_OPERAND: Self = Self(300);
    pub const UNEXPECTED_OPERATION: Self = Self(301);
    pub const UNEXPECTED_END: Self = Self(302);
    pub const MISMATCHED_BRACKETS: Self = Self(303);
    pub const UNCLOSED_BRACKET: Self = Self(304);
    pub const SYNTAX_ERROR: Self = Self(305);

    // ── Evaluation errors (E400–E499) ──
    pub const UNINITIALIZED_VARIABLE: Self = Self(400);
    pub const UNEXPECTED_RESULT_TYPE: Self = Self(401);

    // ── Domain errors (E500–E599) ──
    pub const DOMAIN: Self = Self(500);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Registry,
            200..=299 => ErrorCategory::Scan,
            300..=399 => ErrorCategory::Syntax,
            400..=499 => ErrorCategory::Evaluation,
            _ => ErrorCategory::Domain,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Everything that can abort a single `evaluate` call.
///
/// None of these leave the session unusable: the registry and the variable
/// store survive every error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The registry failed its load-time compatibility check.
    #[error("incompatible registry: {conflict}")]
    IncompatibleRegistry { conflict: Conflict },

    #[error("invalid number '{literal}' at {span}")]
    InvalidNumber { literal: String, span: Span },

    /// No registered designation matches at this position.
    #[error("unknown operator '{designation}' at {span}")]
    UnknownOperator { designation: String, span: Span },

    /// An operand (or function) where an infix/postfix operator was expected.
    #[error("unexpected operand at {span}")]
    UnexpectedOperand { span: Span },

    /// An infix/postfix operator where an operand was expected.
    #[error("unexpected operation '{designation}' at {span}")]
    UnexpectedOperation { designation: String, span: Span },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A closing bracket whose pair does not match the innermost open bracket.
    #[error("mismatched brackets at {span}")]
    MismatchedBrackets { span: Span },

    /// An open bracket that is never closed. The span points at the open bracket.
    #[error("missing a closing bracket for the bracket at {span}")]
    UnclosedBracket { span: Span },

    /// The RPN sequence did not reduce to exactly one value.
    #[error("syntax error: {0}")]
    SyntaxError(String),

    #[error("uninitialized variable '{name}'")]
    UninitializedVariable { name: String },

    /// The expression reduced to a bare variable instead of a number.
    #[error("unexpected type of result: variable '{name}'")]
    UnexpectedResultType { name: String },

    /// An operation rejected its operands.
    #[error("incorrect operand in '{operation}': {message}")]
    Domain { operation: String, message: String },
}

impl CalcError {
    /// Build a domain error for the given operation.
    pub fn domain(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Stable numeric code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::IncompatibleRegistry { .. } => ErrorCode::INCOMPATIBLE_REGISTRY,
            Self::InvalidNumber { .. } => ErrorCode::INVALID_NUMBER,
            Self::UnknownOperator { .. } => ErrorCode::UNKNOWN_OPERATOR,
            Self::UnexpectedOperand { .. } => ErrorCode::UNEXPECTED_OPERAND,
            Self::UnexpectedOperation { .. } => ErrorCode::UNEXPECTED_OPERATION,
            Self::UnexpectedEnd => ErrorCode::UNEXPECTED_END,
            Self::MismatchedBrackets { .. } => ErrorCode::MISMATCHED_BRACKETS,
            Self::UnclosedBracket { .. } => ErrorCode::UNCLOSED_BRACKET,
            Self::SyntaxError(_) => ErrorCode::SYNTAX_ERROR,
            Self::UninitializedVariable { .. } => ErrorCode::UNINITIALIZED_VARIABLE,
            Self::UnexpectedResultType { .. } => ErrorCode::UNEXPECTED_RESULT_TYPE,
            Self::Domain { .. } => ErrorCode::DOMAIN,
        }
    }

    /// Category derived from the error code.
    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Source location, for errors tied to a token.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::InvalidNumber { span, .. }
            | Self::UnknownOperator { span, .. }
            | Self::UnexpectedOperand { span }
            | Self::UnexpectedOperation { span, .. }
            | Self::MismatchedBrackets { span }
            | Self::UnclosedBracket { span } => Some(*span),
            _ => None,
        }
    }

    /// Structured form for machine-readable output.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            category: self.category(),
            message: self.to_string(),
            span: self.span(),
        }
    }
}

/// A structured, serializable error.
///
/// Front ends render these; they must not parse the `Display` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Option<Span>,
}

/// Errors raised while an extension populates the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("empty name in the {table} table")]
    EmptyName { table: Table },

    #[error("'{name}' is already registered in the {table} table")]
    Duplicate { table: Table, name: String },

    /// The operation's kind belongs in a different table.
    #[error("'{name}' is a {found} operation and cannot be registered in the {table} table")]
    WrongKind {
        table: Table,
        name: String,
        found: Table,
    },
}
