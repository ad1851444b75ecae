//! `trig`: sine, cosine and the constants `pi` and `e`.

use std::f64::consts;

use rpncalc_types::{Operation, RegistrationError, Registry};

use super::unary;
use crate::Extension;

pub struct Trig;

impl Extension for Trig {
    fn name(&self) -> &'static str {
        "trig"
    }

    fn register(&self, registry: &mut Registry) -> Result<(), RegistrationError> {
        registry.register_function("sin", Operation::function(|ops| unary(ops, f64::sin)))?;
        registry.register_function("cos", Operation::function(|ops| unary(ops, f64::cos)))?;
        registry.register_constant("pi", consts::PI)?;
        registry.register_constant("e", consts::E)?;
        Ok(())
    }
}
