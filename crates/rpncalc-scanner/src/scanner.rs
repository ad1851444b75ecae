//! Core rpncalc scanner: converts an expression into a token stream.
//!
//! - Numbers: decimal literals with an optional fraction and exponent
//! - Names: functions, then constants, then session variables
//! - Designations: greedy longest match against the operator tables, with
//!   the candidate tables chosen by whether an operand was just read
//!
//! Scanning stops at the first error.

use std::sync::Arc;

use rpncalc_types::{CalcError, Operation, Registry, Result, Span, Table, VariableStore};
use tracing::{debug, trace};

use crate::token::{Token, TokenKind};

/// The rpncalc scanner.
///
/// Borrows the registry read-only and the session's variable store
/// read-write: unknown identifiers become variables on first sight.
pub struct Scanner<'a> {
    /// The expression as characters, so columns count characters.
    chars: Vec<char>,
    /// Current index into `chars`.
    pos: usize,
    registry: &'a Registry,
    variables: &'a mut VariableStore,
    /// `true` right after a number, variable, constant or postfix operator.
    after_operand: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(expression: &str, registry: &'a Registry, variables: &'a mut VariableStore) -> Self {
        Self {
            chars: expression.chars().collect(),
            pos: 0,
            registry,
            variables,
            after_operand: false,
        }
    }

    /// Scan the whole expression.
    pub fn scan(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let Some(ch) = self.peek() else {
                break;
            };

            let token = if ch.is_ascii_digit() || ch == '.' {
                self.scan_number()?
            } else if is_name_char(ch) {
                self.scan_name()
            } else {
                self.scan_designation()?
            };
            trace!(token = %token, column = token.span.start, "scanned");
            tokens.push(token);
        }

        debug!(tokens = tokens.len(), "scan complete");
        Ok(tokens)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }

    /// Span of `chars[start..self.pos]`, in 1-based columns.
    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32 + 1, self.pos.max(start + 1) as u32)
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Numbers
    // ─────────────────────────────────────────────────────────────

    fn scan_number(&mut self) -> Result<Token> {
        let start = self.pos;

        let int_start = self.pos;
        self.skip_while(|c| c.is_ascii_digit());
        let mut digits = self.pos - int_start;

        if self.peek() == Some('.') {
            self.pos += 1;
            let frac_start = self.pos;
            self.skip_while(|c| c.is_ascii_digit());
            digits += self.pos - frac_start;
        }

        if digits == 0 {
            return Err(CalcError::InvalidNumber {
                literal: self.text(start, self.pos),
                span: self.span_from(start),
            });
        }

        // An exponent only counts when a digit follows the marker and sign.
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.skip_while(|c| c.is_ascii_digit());
            }
        }

        let literal = self.text(start, self.pos);
        let span = self.span_from(start);
        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.after_operand = true;
                Ok(Token::new(TokenKind::Number(value), span))
            }
            _ => Err(CalcError::InvalidNumber { literal, span }),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Names
    // ─────────────────────────────────────────────────────────────

    fn scan_name(&mut self) -> Token {
        let start = self.pos;
        self.skip_while(is_name_char);
        let name = self.text(start, self.pos);
        let span = self.span_from(start);

        if let Some(op) = self.registry.function(&name) {
            self.after_operand = false;
            return Token::new(TokenKind::Operation(Arc::clone(op)), span);
        }

        self.after_operand = true;
        if let Some(value) = self.registry.constant(&name) {
            return Token::new(TokenKind::Number(value), span);
        }
        let id = self.variables.intern(&name);
        Token::new(TokenKind::Variable(id), span)
    }

    // ─────────────────────────────────────────────────────────────
    // Designations
    // ─────────────────────────────────────────────────────────────

    fn scan_designation(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut end = start;
        while self.chars.get(end).copied().is_some_and(is_designation_char) {
            end += 1;
        }

        // Longest candidate first; at equal length postfix beats infix.
        for len in (1..=end - start).rev() {
            let candidate = self.text(start, start + len);
            if let Some(op) = self.resolve(&candidate) {
                let op = Arc::clone(op);
                self.pos = start + len;
                self.after_operand = op.table() == Table::Postfix;
                return Ok(Token::new(TokenKind::Operation(op), self.span_from(start)));
            }
        }

        self.pos = end;
        Err(CalcError::UnknownOperator {
            designation: self.text(start, end),
            span: self.span_from(start),
        })
    }

    fn resolve(&self, designation: &str) -> Option<&'a Arc<Operation>> {
        if self.after_operand {
            self.registry
                .postfix(designation)
                .or_else(|| self.registry.infix(designation))
        } else {
            self.registry.prefix(designation)
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_designation_char(ch: char) -> bool {
    !(ch.is_whitespace() || ch.is_ascii_digit() || ch == '.' || is_name_char(ch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpncalc_types::{Grouping, Operands};

    fn sum(ops: &mut Operands<'_>) -> Result<f64> {
        Ok(ops.number(0)? + ops.number(1)?)
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_infix("+", Operation::infix(1.0, Grouping::LeftToRight, sum))
            .unwrap();
        registry
            .register_infix("**", Operation::infix(5.0, Grouping::RightToLeft, sum))
            .unwrap();
        registry
            .register_infix("*", Operation::infix(2.0, Grouping::LeftToRight, sum))
            .unwrap();
        registry
            .register_prefix("-", Operation::prefix(4.0, |ops| Ok(-ops.number(0)?)))
            .unwrap();
        registry
            .register_postfix("!", Operation::postfix(6.0, |ops| ops.number(0)))
            .unwrap();
        registry.register_constant("pi", std::f64::consts::PI).unwrap();
        registry
            .register_function("neg", Operation::function(|ops| Ok(-ops.number(0)?)))
            .unwrap();
        registry
    }

    fn scan(expression: &str) -> Result<Vec<Token>> {
        let registry = registry();
        let mut store = VariableStore::new();
        Scanner::new(expression, &registry, &mut store).scan()
    }

    fn texts(expression: &str) -> Vec<String> {
        scan(expression)
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_number_forms() {
        for (text, value) in [
            ("42", 42.0),
            ("3.25", 3.25),
            (".5", 0.5),
            ("7.", 7.0),
            ("1e3", 1000.0),
            ("2.5E-1", 0.25),
            ("1e+2", 100.0),
        ] {
            let tokens = scan(text).unwrap();
            assert_eq!(tokens.len(), 1, "{text}");
            assert_eq!(tokens[0].kind, TokenKind::Number(value), "{text}");
        }
    }

    #[test]
    fn test_lone_dot_is_invalid() {
        assert!(matches!(
            scan("."),
            Err(CalcError::InvalidNumber { ref literal, .. }) if literal == "."
        ));
    }

    #[test]
    fn test_overflow_is_invalid() {
        assert!(matches!(scan("1e999"), Err(CalcError::InvalidNumber { .. })));
    }

    #[test]
    fn test_exponent_needs_digits() {
        // "2e" leaves the 'e' for the name scanner.
        let tokens = scan("2e").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Number(2.0));
        assert!(matches!(tokens[1].kind, TokenKind::Variable(_)));
    }

    #[test]
    fn test_second_dot_starts_new_number() {
        assert_eq!(texts("1.2.3"), vec!["1.2", "0.3"]);
    }

    #[test]
    fn test_spans_are_columns() {
        let tokens = scan("12 + pi").unwrap();
        assert_eq!(tokens[0].span, Span::new(1, 2));
        assert_eq!(tokens[1].span, Span::point(4));
        assert_eq!(tokens[2].span, Span::new(6, 7));
    }

    #[test]
    fn test_longest_infix_match() {
        assert_eq!(texts("2**3"), vec!["2", "**", "3"]);
        assert_eq!(texts("2*3"), vec!["2", "*", "3"]);
    }

    #[test]
    fn test_prefix_only_before_operand() {
        let tokens = scan("-2").unwrap();
        assert_eq!(tokens[0].operation().unwrap().table(), Table::Prefix);
        // '+' has no prefix meaning.
        assert!(matches!(
            scan("+2"),
            Err(CalcError::UnknownOperator { ref designation, .. }) if designation == "+"
        ));
    }

    #[test]
    fn test_postfix_keeps_operand_state() {
        assert_eq!(texts("3!+1"), vec!["3", "!", "+", "1"]);
    }

    #[test]
    fn test_unknown_operator_reports_whole_run() {
        let err = scan("1 $$ 2").unwrap_err();
        assert_eq!(
            err,
            CalcError::UnknownOperator {
                designation: "$$".into(),
                span: Span::new(3, 4)
            }
        );
    }

    #[test]
    fn test_function_then_operand() {
        let tokens = scan("neg -pi").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].operation().unwrap().designation(), "-");
        assert_eq!(tokens[1].operation().unwrap().table(), Table::Prefix);
        assert_eq!(tokens[2].kind, TokenKind::Number(std::f64::consts::PI));
    }

    #[test]
    fn test_variables_are_interned() {
        let registry = registry();
        let mut store = VariableStore::new();
        let first = Scanner::new("x + y + x", &registry, &mut store).scan().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(first[0].kind, first[4].kind);

        let again = Scanner::new("x", &registry, &mut store).scan().unwrap();
        assert_eq!(again[0].kind, first[0].kind);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unicode_identifier() {
        let registry = registry();
        let mut store = VariableStore::new();
        Scanner::new("größe", &registry, &mut store).scan().unwrap();
        assert!(store.lookup("größe").is_some());
    }

    #[test]
    fn test_empty_expression() {
        assert!(scan("").unwrap().is_empty());
        assert!(scan("   \t").unwrap().is_empty());
    }
}
