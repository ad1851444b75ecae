//! `pow`: right-grouping exponentiation.

use rpncalc_types::{Grouping, Operation, RegistrationError, Registry};

use crate::Extension;

const POWER: f32 = 5.0;

pub struct Pow;

impl Extension for Pow {
    fn name(&self) -> &'static str {
        "pow"
    }

    fn register(&self, registry: &mut Registry) -> Result<(), RegistrationError> {
        registry.register_infix(
            "^",
            Operation::infix(POWER, Grouping::RightToLeft, |ops| {
                let base = ops.number(0)?;
                let exponent = ops.number(1)?;
                if base < 0.0 && exponent < 0.0 {
                    return Err(ops.domain_error("base and exponent are both negative"));
                }
                Ok(base.powf(exponent))
            }),
        )
    }
}
