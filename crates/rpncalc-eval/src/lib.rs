//! rpncalc evaluator: reduces an RPN token sequence to a number.

pub mod evaluator;

pub use evaluator::Evaluator;
