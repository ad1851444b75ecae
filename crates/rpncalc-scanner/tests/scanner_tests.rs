//! Scanner tests against the standard registry.
//!
//! Covers: numbers, names resolved as functions, constants or variables,
//! prefix/infix disambiguation of shared designations, postfix precedence
//! over infix, scan errors, and the 100-iteration determinism test.

use rpncalc_scanner::{Scanner, Token, TokenKind};
use rpncalc_types::{
    CalcError, Grouping, Operation, Registry, Result, Span, Table, VariableStore,
};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn standard() -> Registry {
    rpncalc_stdlib::standard_registry().unwrap()
}

fn scan_with(registry: &Registry, expression: &str) -> Result<Vec<Token>> {
    let mut store = VariableStore::new();
    Scanner::new(expression, registry, &mut store).scan()
}

/// Scan with the standard registry and render each token.
fn texts(expression: &str) -> Vec<String> {
    scan_with(&standard(), expression)
        .unwrap()
        .iter()
        .map(|t| t.to_string())
        .collect()
}

/// Table of each operation token, `None` for operands.
fn tables(expression: &str) -> Vec<Option<Table>> {
    scan_with(&standard(), expression)
        .unwrap()
        .iter()
        .map(|t| t.operation().map(|op| op.table()))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────
// Token streams
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_simple_expression() {
    assert_eq!(texts("3 + 4 * 2"), vec!["3", "+", "4", "*", "2"]);
}

#[test]
fn test_whitespace_is_optional() {
    assert_eq!(texts("3+4*2"), texts("  3 +\t4 *  2 "));
}

#[test]
fn test_minus_is_prefix_or_infix_by_position() {
    assert_eq!(
        tables("-3 - -4"),
        vec![
            Some(Table::Prefix),
            None,
            Some(Table::Infix),
            Some(Table::Prefix),
            None
        ]
    );
}

#[test]
fn test_brackets() {
    assert_eq!(
        tables("(1)"),
        vec![Some(Table::Prefix), None, Some(Table::Postfix)]
    );
    // After a close bracket an operator is expected.
    assert_eq!(tables("(1)-2")[3], Some(Table::Infix));
}

#[test]
fn test_function_call() {
    let tokens = scan_with(&standard(), "sin(0)").unwrap();
    assert_eq!(tokens[0].operation().unwrap().table(), Table::Function);
    assert_eq!(tokens[1].operation().unwrap().open_pair(), Some(1));
}

#[test]
fn test_constants_become_numbers() {
    let tokens = scan_with(&standard(), "pi").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number(std::f64::consts::PI));
    assert_eq!(tokens[0].span, Span::new(1, 2));
}

#[test]
fn test_unknown_names_become_variables() {
    let registry = standard();
    let mut store = VariableStore::new();
    let tokens = Scanner::new("rate * rate_2", &registry, &mut store).scan();
    // Digits end a name, so "rate_2" is "rate_" followed by 2.
    let tokens = tokens.unwrap();
    assert_eq!(tokens.len(), 4);
    assert!(store.lookup("rate").is_some());
    assert!(store.lookup("rate_").is_some());
    assert_eq!(store.get(store.lookup("rate").unwrap()).unwrap().value(), None);
}

// ─────────────────────────────────────────────────────────────────────
// Designation matching
// ─────────────────────────────────────────────────────────────────────

fn factorial_registry() -> Registry {
    let mut registry = standard();
    registry
        .register_postfix("!", Operation::postfix(6.0, |ops| ops.number(0)))
        .unwrap();
    registry
        .register_infix(
            "!=",
            Operation::infix(0.5, Grouping::LeftToRight, |ops| {
                Ok(f64::from(u8::from(ops.number(0)? != ops.number(1)?)))
            }),
        )
        .unwrap();
    registry
        .register_postfix("!!", Operation::postfix(6.0, |ops| ops.number(0)))
        .unwrap();
    registry
}

#[test]
fn test_longest_match_wins() {
    let registry = factorial_registry();
    let tokens = scan_with(&registry, "3!=4").unwrap();
    assert_eq!(tokens[1].to_string(), "!=");
    assert_eq!(tokens[1].operation().unwrap().table(), Table::Infix);

    let tokens = scan_with(&registry, "3!!").unwrap();
    assert_eq!(tokens[1].to_string(), "!!");
}

#[test]
fn test_postfix_beats_infix_at_same_length() {
    let mut registry = Registry::new();
    registry
        .register_postfix("%", Operation::postfix(6.0, |ops| Ok(ops.number(0)? / 100.0)))
        .unwrap();
    registry
        .register_infix(
            "%",
            Operation::infix(2.0, Grouping::LeftToRight, |ops| {
                Ok(ops.number(0)? % ops.number(1)?)
            }),
        )
        .unwrap();
    let tokens = scan_with(&registry, "5%").unwrap();
    assert_eq!(tokens[1].operation().unwrap().table(), Table::Postfix);
}

#[test]
fn test_shorter_match_leaves_rest_for_next_token() {
    // "*-" is not registered: '*' is infix, then '-' is prefix.
    assert_eq!(
        tables("2*-3"),
        vec![None, Some(Table::Infix), Some(Table::Prefix), None]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_operator() {
    assert_eq!(
        scan_with(&standard(), "2 # 3").unwrap_err(),
        CalcError::UnknownOperator {
            designation: "#".into(),
            span: Span::point(3)
        }
    );
}

#[test]
fn test_infix_only_designation_at_start() {
    assert!(matches!(
        scan_with(&standard(), "* 2"),
        Err(CalcError::UnknownOperator { .. })
    ));
}

#[test]
fn test_invalid_number() {
    let err = scan_with(&standard(), "1 + .").unwrap_err();
    assert_eq!(err.span(), Some(Span::point(5)));
    assert!(matches!(err, CalcError::InvalidNumber { .. }));
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_determinism_100_iterations() {
    let expected = texts("x = sin(pi / 2) ^ 2 + -(3 - 1.5e1)");
    for _ in 0..100 {
        assert_eq!(texts("x = sin(pi / 2) ^ 2 + -(3 - 1.5e1)"), expected);
    }
}
