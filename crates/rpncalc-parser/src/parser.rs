//! Shunting-yard parser.
//!
//! Tokens are moved between three vectors: the scanner's input, the stack of
//! held operations, and the output. A two-state machine tracks whether the
//! next token must start an operand or continue after one.

use std::mem;

use rpncalc_scanner::{Token, TokenKind};
use rpncalc_types::{
    CalcError, Grouping, Operation, OperationKind, PostfixKind, PrefixKind, Result,
};
use tracing::{debug, trace};

/// What the parser expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// An operand, or something that prefixes one.
    Operand,
    /// An infix or postfix operation after a complete operand.
    Operation,
}

/// The rpncalc parser.
///
/// Consumes a token stream produced by the scanner and returns the same
/// tokens in RPN order. Bracket tokens are kept in the output, the open
/// bracket directly before its close bracket.
pub struct Parser {
    tokens: Vec<Token>,
    /// Held operations; the top is the last element.
    held: Vec<Token>,
    output: Vec<Token>,
    state: State,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            held: Vec::new(),
            output: Vec::with_capacity(tokens.len()),
            tokens,
            state: State::Operand,
        }
    }

    /// Reorder the tokens into RPN.
    pub fn parse(mut self) -> Result<Vec<Token>> {
        for token in mem::take(&mut self.tokens) {
            trace!(token = %token, state = ?self.state, "parse");
            match self.state {
                State::Operand => self.accept_operand(token)?,
                State::Operation => self.accept_operation(token)?,
            }
        }

        if self.state != State::Operation {
            return Err(CalcError::UnexpectedEnd);
        }
        self.flush()?;

        debug!(rpn = self.output.len(), "parse complete");
        Ok(self.output)
    }

    // ── States ────────────────────────────────────────────────────────────────

    fn accept_operand(&mut self, token: Token) -> Result<()> {
        let prefixes = match &token.kind {
            TokenKind::Number(_) | TokenKind::Variable(_) => false,
            TokenKind::Operation(op) => match op.kind() {
                OperationKind::Function | OperationKind::Prefix(_) => true,
                OperationKind::Infix(_) | OperationKind::Postfix(_) => {
                    return Err(CalcError::UnexpectedOperation {
                        designation: op.designation().to_string(),
                        span: token.span,
                    });
                }
            },
        };

        if prefixes {
            self.held.push(token);
        } else {
            self.output.push(token);
            self.state = State::Operation;
        }
        Ok(())
    }

    fn accept_operation(&mut self, token: Token) -> Result<()> {
        let op = match &token.kind {
            TokenKind::Operation(op) => op.clone(),
            TokenKind::Number(_) | TokenKind::Variable(_) => {
                return Err(CalcError::UnexpectedOperand { span: token.span });
            }
        };

        match op.kind() {
            OperationKind::Infix(_) => {
                self.displace(&op);
                self.held.push(token);
                self.state = State::Operand;
            }
            OperationKind::Postfix(PostfixKind::Plain) => {
                self.displace(&op);
                self.held.push(token);
            }
            OperationKind::Postfix(PostfixKind::CloseBracket { pair }) => {
                self.close_bracket(token, pair)?;
            }
            OperationKind::Function | OperationKind::Prefix(_) => {
                return Err(CalcError::UnexpectedOperand { span: token.span });
            }
        }
        Ok(())
    }

    // ── Stack moves ───────────────────────────────────────────────────────────

    /// Move held operations that bind tighter than `incoming` to the output.
    /// Stops at the first one that does not.
    fn displace(&mut self, incoming: &Operation) {
        while let Some(top) = self.held.last() {
            let displaced = top.operation().is_some_and(|top| displaces(top, incoming));
            if !displaced {
                break;
            }
            if let Some(top) = self.held.pop() {
                self.output.push(top);
            }
        }
    }

    /// Unwind to the innermost open bracket and check it pairs with `close`.
    fn close_bracket(&mut self, close: Token, pair: i32) -> Result<()> {
        while let Some(top) = self.held.pop() {
            let open_pair = top.operation().and_then(|op| op.open_pair());
            match open_pair {
                Some(open) if open == pair => {
                    self.output.push(top);
                    self.output.push(close);
                    return Ok(());
                }
                Some(_) => return Err(CalcError::MismatchedBrackets { span: close.span }),
                None => self.output.push(top),
            }
        }
        Err(CalcError::MismatchedBrackets { span: close.span })
    }

    /// Move every held operation to the output. Any open bracket still held
    /// was never closed.
    fn flush(&mut self) -> Result<()> {
        while let Some(top) = self.held.pop() {
            let is_open = top.operation().is_some_and(|op| op.open_pair().is_some());
            if is_open {
                return Err(CalcError::UnclosedBracket { span: top.span });
            }
            self.output.push(top);
        }
        Ok(())
    }
}

/// Whether the held operation `top` must be output before `incoming` is held.
fn displaces(top: &Operation, incoming: &Operation) -> bool {
    match top.kind() {
        OperationKind::Function | OperationKind::Postfix(PostfixKind::Plain) => true,
        OperationKind::Infix(grouping) => {
            matches!(incoming.kind(), OperationKind::Infix(_))
                && match grouping {
                    Grouping::LeftToRight => top.priority() >= incoming.priority(),
                    Grouping::RightToLeft => top.priority() > incoming.priority(),
                }
        }
        OperationKind::Prefix(PrefixKind::Plain) => top.priority() > incoming.priority(),
        OperationKind::Prefix(PrefixKind::OpenBracket { .. })
        | OperationKind::Postfix(PostfixKind::CloseBracket { .. }) => false,
    }
}
