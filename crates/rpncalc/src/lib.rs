//! rpncalc: evaluates arithmetic expressions whose operators, functions and
//! constants come from extension modules.
//!
//! ```text
//! expression → Scanner → tokens → Parser → RPN → Evaluator → f64
//! ```
//!
//! A [`Session`] owns the registry and the variables shared by every
//! expression it evaluates.

mod session;

pub use rpncalc_scanner::{Token, TokenKind};
pub use rpncalc_stdlib::{by_name, standard, Extension, STANDARD_NAMES};
pub use rpncalc_types::{
    CalcError, Conflict, ErrorCategory, ErrorCode, ErrorReport, Grouping, Operation, Operands,
    RegistrationError, Registry, RegistryTable, Result, Span, Variable, VariableStore,
};
pub use session::{format_rpn, EvalReport, Session};
