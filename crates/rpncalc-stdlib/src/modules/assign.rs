//! `assign`: `x = expr` stores into a session variable.

use rpncalc_types::{Grouping, Operation, RegistrationError, Registry};

use crate::Extension;

/// Lower than every arithmetic operator, so the whole right side is
/// evaluated first.
const ASSIGNMENT: f32 = 0.0;

pub struct Assign;

impl Extension for Assign {
    fn name(&self) -> &'static str {
        "assign"
    }

    fn register(&self, registry: &mut Registry) -> Result<(), RegistrationError> {
        registry.register_infix(
            "=",
            Operation::infix(ASSIGNMENT, Grouping::RightToLeft, |ops| {
                let value = ops.number(1)?;
                ops.assign(0, value)?;
                Ok(value)
            }),
        )
    }
}
