//! Registry of the functions, operators and constants contributed by
//! extensions.
//!
//! Five tables, each keyed by designation:
//!
//! - function names
//! - infix designations
//! - prefix designations (open brackets included)
//! - postfix designations (close brackets included)
//! - constant names
//!
//! The registry is filled once before any evaluation and is read-only
//! afterwards. The tables are ordered so the compatibility check can walk two
//! of them side by side.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::operation::{Grouping, Operation, OperationKind, PostfixKind, PrefixKind};
use crate::RegistrationError;

/// One of the registry's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Function,
    Infix,
    Prefix,
    Postfix,
    Constant,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Infix => write!(f, "infix"),
            Self::Prefix => write!(f, "prefix"),
            Self::Postfix => write!(f, "postfix"),
            Self::Constant => write!(f, "constant"),
        }
    }
}

/// The first name found in two tables that must stay disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Conflict {
    FunctionConstant(String),
    InfixPostfix(String),
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FunctionConstant(name) => {
                write!(f, "'{name}' is both a function and a constant")
            }
            Self::InfixPostfix(name) => {
                write!(f, "'{name}' is both an infix and a postfix operator")
            }
        }
    }
}

type OperationTable = BTreeMap<String, Arc<Operation>>;

/// Operations and constants, one table per kind.
///
/// A name may appear once per table. A second `register_*` call for the same
/// name in the same table fails with [`RegistrationError::Duplicate`] and
/// leaves the first registration in place, so two extensions cannot both
/// provide infix `-`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    functions: OperationTable,
    infix: OperationTable,
    prefix: OperationTable,
    postfix: OperationTable,
    constants: BTreeMap<String, f64>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function. Fails if `name` is already a function.
    pub fn register_function(
        &mut self,
        name: &str,
        operation: Operation,
    ) -> Result<(), RegistrationError> {
        insert_operation(&mut self.functions, Table::Function, name, operation)
    }

    /// Register an infix operator. Fails if `designation` is already infix.
    pub fn register_infix(
        &mut self,
        designation: &str,
        operation: Operation,
    ) -> Result<(), RegistrationError> {
        insert_operation(&mut self.infix, Table::Infix, designation, operation)
    }

    /// Register a prefix operator or an open bracket. Fails if
    /// `designation` is already a prefix.
    pub fn register_prefix(
        &mut self,
        designation: &str,
        operation: Operation,
    ) -> Result<(), RegistrationError> {
        insert_operation(&mut self.prefix, Table::Prefix, designation, operation)
    }

    /// Register a postfix operator or a close bracket. Fails if
    /// `designation` is already a postfix.
    pub fn register_postfix(
        &mut self,
        designation: &str,
        operation: Operation,
    ) -> Result<(), RegistrationError> {
        insert_operation(&mut self.postfix, Table::Postfix, designation, operation)
    }

    /// Register a constant. Fails if `name` is already a constant.
    pub fn register_constant(&mut self, name: &str, value: f64) -> Result<(), RegistrationError> {
        check_name(Table::Constant, name)?;
        if self.constants.contains_key(name) {
            return Err(RegistrationError::Duplicate {
                table: Table::Constant,
                name: name.to_string(),
            });
        }
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&Arc<Operation>> {
        self.functions.get(name)
    }

    pub fn infix(&self, designation: &str) -> Option<&Arc<Operation>> {
        self.infix.get(designation)
    }

    pub fn prefix(&self, designation: &str) -> Option<&Arc<Operation>> {
        self.prefix.get(designation)
    }

    pub fn postfix(&self, designation: &str) -> Option<&Arc<Operation>> {
        self.postfix.get(designation)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Total number of registered entries across every table.
    pub fn len(&self) -> usize {
        self.functions.len()
            + self.infix.len()
            + self.prefix.len()
            + self.postfix.len()
            + self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when no name is both a function and a constant and no
    /// designation is both infix and postfix.
    pub fn check_compatibility(&self) -> bool {
        self.find_conflict().is_none()
    }

    /// The first violation of table disjointness, if any.
    pub fn find_conflict(&self) -> Option<Conflict> {
        if let Some(name) = first_common_key(self.functions.keys(), self.constants.keys()) {
            return Some(Conflict::FunctionConstant(name.clone()));
        }
        first_common_key(self.infix.keys(), self.postfix.keys())
            .map(|name| Conflict::InfixPostfix(name.clone()))
    }

    /// Serializable listing of every table, ordered by designation.
    pub fn describe(&self) -> RegistryTable {
        RegistryTable {
            functions: self.functions.values().map(|op| OperationEntry::from(&**op)).collect(),
            infix: self.infix.values().map(|op| OperationEntry::from(&**op)).collect(),
            prefix: self.prefix.values().map(|op| OperationEntry::from(&**op)).collect(),
            postfix: self.postfix.values().map(|op| OperationEntry::from(&**op)).collect(),
            constants: self
                .constants
                .iter()
                .map(|(name, value)| ConstantEntry {
                    name: name.clone(),
                    value: *value,
                })
                .collect(),
        }
    }
}

fn check_name(table: Table, name: &str) -> Result<(), RegistrationError> {
    if name.is_empty() {
        return Err(RegistrationError::EmptyName { table });
    }
    Ok(())
}

fn insert_operation(
    map: &mut OperationTable,
    table: Table,
    name: &str,
    operation: Operation,
) -> Result<(), RegistrationError> {
    check_name(table, name)?;
    if operation.table() != table {
        return Err(RegistrationError::WrongKind {
            table,
            name: name.to_string(),
            found: operation.table(),
        });
    }
    if map.contains_key(name) {
        return Err(RegistrationError::Duplicate {
            table,
            name: name.to_string(),
        });
    }
    map.insert(name.to_string(), Arc::new(operation.designated(name)));
    Ok(())
}

/// Merge-join two ascending key sequences, returning the first shared key.
fn first_common_key<'a, A, B>(left: A, right: B) -> Option<&'a String>
where
    A: IntoIterator<Item = &'a String>,
    B: IntoIterator<Item = &'a String>,
{
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        match l.cmp(r) {
            Ordering::Less => {
                left.next();
            }
            Ordering::Greater => {
                right.next();
            }
            Ordering::Equal => return Some(*l),
        }
    }
    None
}

// ── Registry listing ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryTable {
    pub functions: Vec<OperationEntry>,
    pub infix: Vec<OperationEntry>,
    pub prefix: Vec<OperationEntry>,
    pub postfix: Vec<OperationEntry>,
    pub constants: Vec<ConstantEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEntry {
    pub designation: String,
    /// `function`, `prefix`, `open_bracket`, `infix`, `postfix` or `close_bracket`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Grouping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<i32>,
}

impl From<&Operation> for OperationEntry {
    fn from(op: &Operation) -> Self {
        let (kind, priority, grouping, pair) = match op.kind() {
            OperationKind::Function => ("function", None, None, None),
            OperationKind::Prefix(PrefixKind::Plain) => ("prefix", Some(op.priority()), None, None),
            OperationKind::Prefix(PrefixKind::OpenBracket { pair }) => {
                ("open_bracket", None, None, Some(pair))
            }
            OperationKind::Infix(grouping) => ("infix", Some(op.priority()), Some(grouping), None),
            OperationKind::Postfix(PostfixKind::Plain) => {
                ("postfix", Some(op.priority()), None, None)
            }
            OperationKind::Postfix(PostfixKind::CloseBracket { pair }) => {
                ("close_bracket", None, None, Some(pair))
            }
        };
        Self {
            designation: op.designation().to_string(),
            kind: kind.to_string(),
            priority,
            grouping,
            pair,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantEntry {
    pub name: String,
    pub value: f64,
}
