//! Standard extension modules for rpncalc.
//!
//! Each module implements [`Extension`] and fills a [`Registry`] with its
//! operations and constants. A session is built from any subset of them,
//! selected by name.

pub mod modules;

use rpncalc_types::{RegistrationError, Registry};
use tracing::debug;

pub use modules::{Assign, Base, Pow, Trig};

/// A bundle of operations and constants contributed to a registry.
///
/// Registration happens once, before the registry's compatibility check
/// and before any evaluation.
pub trait Extension {
    /// Short name used to select the extension, e.g. `"base"`.
    fn name(&self) -> &'static str;

    fn register(&self, registry: &mut Registry) -> Result<(), RegistrationError>;
}

/// Names of the standard modules, in registration order.
pub const STANDARD_NAMES: &[&str] = &["base", "pow", "trig", "assign"];

/// Every standard module, in registration order.
pub fn standard() -> Vec<Box<dyn Extension>> {
    vec![
        Box::new(Base),
        Box::new(Pow),
        Box::new(Trig),
        Box::new(Assign),
    ]
}

/// Look up a standard module by name.
pub fn by_name(name: &str) -> Option<Box<dyn Extension>> {
    match name {
        "base" => Some(Box::new(Base)),
        "pow" => Some(Box::new(Pow)),
        "trig" => Some(Box::new(Trig)),
        "assign" => Some(Box::new(Assign)),
        _ => None,
    }
}

/// Register `extensions` in order, stopping at the first failure.
pub fn load(registry: &mut Registry, extensions: &[Box<dyn Extension>]) -> Result<(), RegistrationError> {
    for extension in extensions {
        let before = registry.len();
        extension.register(registry)?;
        debug!(
            extension = extension.name(),
            entries = registry.len() - before,
            "extension registered"
        );
    }
    Ok(())
}

/// A registry holding every standard module.
pub fn standard_registry() -> Result<Registry, RegistrationError> {
    let mut registry = Registry::new();
    load(&mut registry, &standard())?;
    Ok(registry)
}
