//! `base`: the four arithmetic operators, negation and parentheses.

use rpncalc_types::{Grouping, Operation, RegistrationError, Registry};

use super::{binary, unary};
use crate::Extension;

/// Pair identifier shared by `(` and `)`.
pub const PAREN_PAIR: i32 = 1;

const ADDITIVE: f32 = 1.0;
const MULTIPLICATIVE: f32 = 2.0;
const NEGATION: f32 = 4.0;

pub struct Base;

impl Extension for Base {
    fn name(&self) -> &'static str {
        "base"
    }

    fn register(&self, registry: &mut Registry) -> Result<(), RegistrationError> {
        registry.register_infix(
            "+",
            Operation::infix(ADDITIVE, Grouping::LeftToRight, |ops| binary(ops, |a, b| a + b)),
        )?;
        registry.register_infix(
            "-",
            Operation::infix(ADDITIVE, Grouping::LeftToRight, |ops| binary(ops, |a, b| a - b)),
        )?;
        registry.register_infix(
            "*",
            Operation::infix(MULTIPLICATIVE, Grouping::LeftToRight, |ops| {
                binary(ops, |a, b| a * b)
            }),
        )?;
        registry.register_infix(
            "/",
            Operation::infix(MULTIPLICATIVE, Grouping::LeftToRight, |ops| {
                binary(ops, |a, b| a / b)
            }),
        )?;
        registry.register_prefix("-", Operation::prefix(NEGATION, |ops| unary(ops, |a| -a)))?;
        registry.register_prefix("(", Operation::open_bracket(PAREN_PAIR))?;
        registry.register_postfix(")", Operation::close_bracket(PAREN_PAIR))?;
        Ok(())
    }
}
