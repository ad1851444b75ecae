//! Operation model: the closed set of operation kinds and the apply contract
//! extensions implement.
//!
//! An [`Operation`] is registered once and then shared (through `Arc`) by
//! the registry and every token that refers to it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::Table;
use crate::variable::{VariableId, VariableStore};
use crate::{CalcError, Result};

/// Priority carried by functions and brackets, which never take part in a
/// priority comparison.
pub const NO_PRIORITY: f32 = -1.0;

/// How equal-priority infix operators group.
///
/// The names describe the resulting grouping: `LeftToRight` pops the held
/// operator on equal priority (`5 - 3 - 1` is `(5 - 3) - 1`), `RightToLeft`
/// keeps it (`2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixKind {
    Plain,
    OpenBracket { pair: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixKind {
    Plain,
    CloseBracket { pair: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Function,
    Prefix(PrefixKind),
    Infix(Grouping),
    Postfix(PostfixKind),
}

impl OperationKind {
    /// The registry table operations of this kind belong to.
    pub fn table(self) -> Table {
        match self {
            Self::Function => Table::Function,
            Self::Prefix(_) => Table::Prefix,
            Self::Infix(_) => Table::Infix,
            Self::Postfix(_) => Table::Postfix,
        }
    }
}

/// Numeric behavior attached to an operation.
///
/// Receives the operands in left-to-right order and returns the value that
/// replaces them on the evaluator's stack.
pub type Handler = Arc<dyn Fn(&mut Operands<'_>) -> Result<f64> + Send + Sync>;

/// A registered function or operator.
#[derive(Clone)]
pub struct Operation {
    designation: String,
    kind: OperationKind,
    priority: f32,
    handler: Option<Handler>,
}

impl Operation {
    fn with_handler<F>(kind: OperationKind, priority: f32, handler: F) -> Self
    where
        F: Fn(&mut Operands<'_>) -> Result<f64> + Send + Sync + 'static,
    {
        Self {
            designation: String::new(),
            kind,
            priority,
            handler: Some(Arc::new(handler)),
        }
    }

    /// A named unary function, e.g. `sin`.
    pub fn function<F>(handler: F) -> Self
    where
        F: Fn(&mut Operands<'_>) -> Result<f64> + Send + Sync + 'static,
    {
        Self::with_handler(OperationKind::Function, NO_PRIORITY, handler)
    }

    /// A unary operator written before its operand, e.g. negation.
    pub fn prefix<F>(priority: f32, handler: F) -> Self
    where
        F: Fn(&mut Operands<'_>) -> Result<f64> + Send + Sync + 'static,
    {
        Self::with_handler(OperationKind::Prefix(PrefixKind::Plain), priority, handler)
    }

    /// A binary operator written between its operands.
    pub fn infix<F>(priority: f32, grouping: Grouping, handler: F) -> Self
    where
        F: Fn(&mut Operands<'_>) -> Result<f64> + Send + Sync + 'static,
    {
        Self::with_handler(OperationKind::Infix(grouping), priority, handler)
    }

    /// A unary operator written after its operand, e.g. factorial.
    pub fn postfix<F>(priority: f32, handler: F) -> Self
    where
        F: Fn(&mut Operands<'_>) -> Result<f64> + Send + Sync + 'static,
    {
        Self::with_handler(
            OperationKind::Postfix(PostfixKind::Plain),
            priority,
            handler,
        )
    }

    /// Opening half of a bracket pair. Registered in the prefix table.
    pub fn open_bracket(pair: i32) -> Self {
        Self {
            designation: String::new(),
            kind: OperationKind::Prefix(PrefixKind::OpenBracket { pair }),
            priority: NO_PRIORITY,
            handler: None,
        }
    }

    /// Closing half of a bracket pair. Registered in the postfix table.
    pub fn close_bracket(pair: i32) -> Self {
        Self {
            designation: String::new(),
            kind: OperationKind::Postfix(PostfixKind::CloseBracket { pair }),
            priority: NO_PRIORITY,
            handler: None,
        }
    }

    pub(crate) fn designated(mut self, designation: &str) -> Self {
        self.designation = designation.to_string();
        self
    }

    /// The name or symbol this operation was registered under.
    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }

    pub fn table(&self) -> Table {
        self.kind.table()
    }

    /// Number of operands consumed at evaluation time.
    pub fn arity(&self) -> usize {
        match self.kind {
            OperationKind::Prefix(PrefixKind::OpenBracket { .. })
            | OperationKind::Postfix(PostfixKind::CloseBracket { .. }) => 0,
            OperationKind::Infix(_) => 2,
            OperationKind::Function
            | OperationKind::Prefix(PrefixKind::Plain)
            | OperationKind::Postfix(PostfixKind::Plain) => 1,
        }
    }

    /// Pair identifier if this is an open bracket.
    pub fn open_pair(&self) -> Option<i32> {
        match self.kind {
            OperationKind::Prefix(PrefixKind::OpenBracket { pair }) => Some(pair),
            _ => None,
        }
    }

    /// Pair identifier if this is a close bracket.
    pub fn close_pair(&self) -> Option<i32> {
        match self.kind {
            OperationKind::Postfix(PostfixKind::CloseBracket { pair }) => Some(pair),
            _ => None,
        }
    }

    /// Run the handler over `operands`.
    pub fn apply(&self, operands: &mut Operands<'_>) -> Result<f64> {
        match &self.handler {
            Some(handler) => handler(operands),
            None => Err(CalcError::SyntaxError(format!(
                "'{}' cannot be applied to operands",
                self.designation
            ))),
        }
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.designation == other.designation
            && self.kind == other.kind
            && self.priority == other.priority
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("designation", &self.designation)
            .field("kind", &self.kind)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// A value on the evaluator's operand stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Number(f64),
    Variable(VariableId),
}

/// The operands handed to one [`Operation::apply`] call.
///
/// Operands are stored left to right, so for `a - b` index 0 is `a` and
/// index 1 is `b`. Variables are only dereferenced on request, which lets an
/// assignment operator reach the cell instead of its value.
pub struct Operands<'a> {
    designation: &'a str,
    values: Vec<Operand>,
    variables: &'a mut VariableStore,
}

impl<'a> Operands<'a> {
    pub fn new(
        designation: &'a str,
        values: Vec<Operand>,
        variables: &'a mut VariableStore,
    ) -> Self {
        Self {
            designation,
            values,
            variables,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Operand> {
        self.values.get(index).copied()
    }

    /// Numeric value of operand `index`, dereferencing variables.
    pub fn number(&self, index: usize) -> Result<f64> {
        match self.values.get(index) {
            Some(Operand::Number(value)) => Ok(*value),
            Some(Operand::Variable(id)) => self.variables.value(*id),
            None => Err(CalcError::SyntaxError(format!(
                "'{}' is missing operand {}",
                self.designation,
                index + 1
            ))),
        }
    }

    /// The variable behind operand `index`, if it is one.
    pub fn variable(&self, index: usize) -> Option<VariableId> {
        match self.values.get(index) {
            Some(Operand::Variable(id)) => Some(*id),
            _ => None,
        }
    }

    /// Store `value` into the variable behind operand `index`.
    pub fn assign(&mut self, index: usize, value: f64) -> Result<()> {
        let assigned = match self.variable(index) {
            Some(id) => self.variables.assign(id, value),
            None => false,
        };
        if !assigned {
            return Err(self.domain_error(format!("operand {} is not a variable", index + 1)));
        }
        Ok(())
    }

    /// A domain error attributed to the operation being applied.
    pub fn domain_error(&self, message: impl Into<String>) -> CalcError {
        CalcError::domain(self.designation, message)
    }
}
