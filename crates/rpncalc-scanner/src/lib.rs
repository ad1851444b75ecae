//! rpncalc scanner: converts expression text into a token stream.

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};
