//! rpncalc parser: reorders a token stream into reverse Polish notation
//! with the shunting-yard algorithm.

pub mod parser;

pub use parser::Parser;
