//! Stack evaluator for RPN token sequences.

use rpncalc_scanner::{Token, TokenKind};
use rpncalc_types::{CalcError, Operand, Operands, Result, VariableStore};
use tracing::{debug, trace};

/// The RPN evaluator.
///
/// Operands are pushed as they arrive; each operation replaces its operands
/// with its result. Variables stay unresolved on the stack until an
/// operation asks for their value.
pub struct Evaluator<'a> {
    variables: &'a mut VariableStore,
    stack: Vec<Operand>,
}

impl<'a> Evaluator<'a> {
    pub fn new(variables: &'a mut VariableStore) -> Self {
        Self {
            variables,
            stack: Vec::new(),
        }
    }

    /// Evaluate `rpn` and return the single number it reduces to.
    pub fn evaluate(mut self, rpn: &[Token]) -> Result<f64> {
        for token in rpn {
            match &token.kind {
                TokenKind::Number(value) => self.stack.push(Operand::Number(*value)),
                TokenKind::Variable(id) => self.stack.push(Operand::Variable(*id)),
                TokenKind::Operation(op) => {
                    let arity = op.arity();
                    // Brackets only shape the parse.
                    if arity == 0 {
                        continue;
                    }
                    if self.stack.len() < arity {
                        return Err(CalcError::SyntaxError(format!(
                            "'{}' needs {} operand(s) but {} available",
                            op.designation(),
                            arity,
                            self.stack.len()
                        )));
                    }
                    let values = self.stack.split_off(self.stack.len() - arity);
                    let mut operands = Operands::new(op.designation(), values, self.variables);
                    let result = op.apply(&mut operands)?;
                    trace!(operation = op.designation(), result, "applied");
                    self.stack.push(Operand::Number(result));
                }
            }
        }

        let result = self.finish()?;
        debug!(result, "evaluation complete");
        Ok(result)
    }

    fn finish(mut self) -> Result<f64> {
        match (self.stack.pop(), self.stack.len()) {
            (Some(Operand::Number(value)), 0) => Ok(value),
            (Some(Operand::Variable(id)), 0) => Err(CalcError::UnexpectedResultType {
                name: self.variables.name(id),
            }),
            (None, _) => Err(CalcError::SyntaxError("no value to return".into())),
            (Some(_), rest) => Err(CalcError::SyntaxError(format!(
                "{} values left on the stack",
                rest + 1
            ))),
        }
    }
}
