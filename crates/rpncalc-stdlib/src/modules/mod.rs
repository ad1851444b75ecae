//! The standard extension modules.

mod assign;
mod base;
mod pow;
mod trig;

pub use assign::Assign;
pub use base::{Base, PAREN_PAIR};
pub use pow::Pow;
pub use trig::Trig;

use rpncalc_types::{Operands, Result};

/// Apply `f` to the left and right operands of a binary operation.
pub(crate) fn binary(ops: &mut Operands<'_>, f: impl Fn(f64, f64) -> f64) -> Result<f64> {
    let left = ops.number(0)?;
    let right = ops.number(1)?;
    Ok(f(left, right))
}

/// Apply `f` to the single operand of a unary operation.
pub(crate) fn unary(ops: &mut Operands<'_>, f: impl Fn(f64) -> f64) -> Result<f64> {
    Ok(f(ops.number(0)?))
}
