//! Session-scoped variable arena.
//!
//! Variables are created the first time the scanner meets an unknown
//! identifier and live as long as the session. Every token that mentions the
//! same name carries the same [`VariableId`], so an assignment made through
//! one token is visible through all of them.

use std::collections::HashMap;
use std::fmt;

use crate::{CalcError, Result};

/// Stable handle to a variable cell inside a [`VariableStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(u32);

impl VariableId {
    /// Position of the cell in its store.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named, lazily initialized numeric cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    value: f64,
    initialized: bool,
}

impl Variable {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: 1.0,
            initialized: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current value, or `None` if nothing has been assigned yet.
    pub fn value(&self) -> Option<f64> {
        self.initialized.then_some(self.value)
    }

    fn set(&mut self, value: f64) {
        self.value = value;
        self.initialized = true;
    }
}

/// Mapping from identifier to variable cell, shared by every expression
/// evaluated in one session.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    cells: Vec<Variable>,
    index: HashMap<String, VariableId>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, creating an uninitialized cell on first sight.
    pub fn intern(&mut self, name: &str) -> VariableId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = VariableId(self.cells.len() as u32);
        self.cells.push(Variable::new(name));
        self.index.insert(name.to_string(), id);
        id
    }

    /// Look up an existing variable without creating it.
    pub fn lookup(&self, name: &str) -> Option<VariableId> {
        self.index.get(name).copied()
    }

    pub fn get(&self, id: VariableId) -> Option<&Variable> {
        self.cells.get(id.index())
    }

    /// Name of the variable, or its `#id` form for a foreign id.
    pub fn name(&self, id: VariableId) -> String {
        self.get(id)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Dereference a variable, failing if it was never assigned.
    pub fn value(&self, id: VariableId) -> Result<f64> {
        self.get(id)
            .and_then(Variable::value)
            .ok_or_else(|| CalcError::UninitializedVariable {
                name: self.name(id),
            })
    }

    /// Assign a value, marking the cell initialized.
    /// Returns `false` if `id` does not belong to this store.
    pub fn assign(&mut self, id: VariableId, value: f64) -> bool {
        match self.cells.get_mut(id.index()) {
            Some(cell) => {
                cell.set(value);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
