//! Shared types for rpncalc.
//!
//! This crate defines the operation model, the registry extensions fill,
//! the session variable store, source spans and the error taxonomy used by
//! every pipeline stage.

mod error;
mod span;
pub mod operation;
pub mod registry;
pub mod variable;

pub use error::{CalcError, ErrorCategory, ErrorCode, ErrorReport, RegistrationError};
pub use operation::{Grouping, Operand, Operands, Operation, OperationKind, PostfixKind, PrefixKind};
pub use registry::{Conflict, Registry, RegistryTable, Table};
pub use span::Span;
pub use variable::{Variable, VariableId, VariableStore};

/// Result type used throughout rpncalc.
pub type Result<T> = std::result::Result<T, CalcError>;
