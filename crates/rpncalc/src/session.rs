//! Evaluation sessions.

use rpncalc_eval::Evaluator;
use rpncalc_parser::Parser;
use rpncalc_scanner::{Scanner, Token, TokenKind};
use rpncalc_stdlib::Extension;
use rpncalc_types::{
    CalcError, Conflict, ErrorReport, RegistrationError, Registry, Result, Variable, VariableStore,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A registry plus the variables every expression evaluated against it
/// shares.
///
/// The registry's compatibility is checked once, when the session is
/// created. An incompatible session stays usable as a value but rejects
/// every expression.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    variables: VariableStore,
    conflict: Option<Conflict>,
}

impl Session {
    pub fn new(registry: Registry) -> Self {
        let conflict = registry.find_conflict();
        match &conflict {
            Some(conflict) => warn!(%conflict, "registry is incompatible"),
            None => debug!(entries = registry.len(), "registry loaded"),
        }
        Self {
            registry,
            variables: VariableStore::new(),
            conflict,
        }
    }

    /// A session with every standard module.
    pub fn standard() -> std::result::Result<Self, RegistrationError> {
        Self::with_extensions(&rpncalc_stdlib::standard())
    }

    /// A session with the given extensions, registered in order.
    pub fn with_extensions(
        extensions: &[Box<dyn Extension>],
    ) -> std::result::Result<Self, RegistrationError> {
        let mut registry = Registry::new();
        rpncalc_stdlib::load(&mut registry, extensions)?;
        Ok(Self::new(registry))
    }

    /// Evaluate one expression.
    ///
    /// Variables created or assigned along the way persist, even if the
    /// expression later fails.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64> {
        let rpn = self.rpn(expression)?;
        self.evaluate_rpn(&rpn)
    }

    /// Evaluate tokens already returned by [`Session::rpn`].
    pub fn evaluate_rpn(&mut self, rpn: &[Token]) -> Result<f64> {
        Evaluator::new(&mut self.variables).evaluate(rpn)
    }

    /// Scan and parse `expression`, returning its RPN form.
    pub fn rpn(&mut self, expression: &str) -> Result<Vec<Token>> {
        if let Some(conflict) = &self.conflict {
            return Err(CalcError::IncompatibleRegistry {
                conflict: conflict.clone(),
            });
        }
        let tokens = Scanner::new(expression, &self.registry, &mut self.variables).scan()?;
        Parser::new(tokens).parse()
    }

    /// Evaluate `expression` into its serializable outcome.
    pub fn report(&mut self, expression: &str) -> EvalReport {
        let (value, error) = match self.evaluate(expression) {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(err.report())),
        };
        EvalReport {
            expression: expression.to_string(),
            value,
            error,
        }
    }

    /// Render RPN tokens with variable names resolved.
    pub fn format_rpn(&self, tokens: &[Token]) -> String {
        format_rpn(tokens, &self.variables)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// The variable named `name`, if any expression has mentioned it.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables
            .lookup(name)
            .and_then(|id| self.variables.get(id))
    }

    pub fn is_compatible(&self) -> bool {
        self.conflict.is_none()
    }

    /// Why the registry was rejected, if it was.
    pub fn conflict(&self) -> Option<&Conflict> {
        self.conflict.as_ref()
    }
}

/// Render tokens separated by spaces, printing variables by name.
pub fn format_rpn(tokens: &[Token], variables: &VariableStore) -> String {
    tokens
        .iter()
        .map(|token| match &token.kind {
            TokenKind::Variable(id) => variables.name(*id),
            _ => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of evaluating one expression, for machine-readable output.
///
/// ```json
/// { "expression": "1 / 2", "value": 0.5 }
/// { "expression": "(1", "error": { "code": 304, "category": "syntax", ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}
