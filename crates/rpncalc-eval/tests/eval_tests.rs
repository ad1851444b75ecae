//! Evaluator tests over the full scan → parse → evaluate pipeline with the
//! standard modules.
//!
//! Covers: arithmetic, grouping, brackets, functions and constants,
//! variables and assignment, domain errors, and result-type checks.

use rpncalc_eval::Evaluator;
use rpncalc_parser::Parser;
use rpncalc_scanner::Scanner;
use rpncalc_types::{CalcError, Registry, Result, VariableStore};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn standard() -> Registry {
    rpncalc_stdlib::standard_registry().unwrap()
}

fn eval_in(registry: &Registry, store: &mut VariableStore, expression: &str) -> Result<f64> {
    let tokens = Scanner::new(expression, registry, store).scan()?;
    let rpn = Parser::new(tokens).parse()?;
    Evaluator::new(store).evaluate(&rpn)
}

fn eval(expression: &str) -> Result<f64> {
    eval_in(&standard(), &mut VariableStore::new(), expression)
}

fn assert_close(actual: Result<f64>, expected: f64) {
    let actual = actual.unwrap();
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ─────────────────────────────────────────────────────────────────────
// Arithmetic
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_arithmetic() {
    assert_eq!(eval("3 + 4 * 2"), Ok(11.0));
    assert_eq!(eval("5 - 3 - 1"), Ok(1.0));
    assert_eq!(eval("2 ^ 3 ^ 2"), Ok(512.0));
    assert_eq!(eval("-3 + 4"), Ok(1.0));
    assert_eq!(eval("(1 + 2) * 3"), Ok(9.0));
    assert_eq!(eval("12 / 4 / 3"), Ok(1.0));
    assert_eq!(eval("-2 ^ 2"), Ok(-4.0));
    assert_eq!(eval("2 ^ -1"), Ok(0.5));
}

#[test]
fn test_decimal_literals() {
    assert_eq!(eval("1.5 * .5"), Ok(0.75));
    assert_close(eval("2e3 + 1E-1"), 2000.1);
}

#[test]
fn test_division_by_zero_is_not_an_error() {
    assert_eq!(eval("1 / 0"), Ok(f64::INFINITY));
    assert!(eval("0 / 0").unwrap().is_nan());
}

#[test]
fn test_functions_and_constants() {
    assert_close(eval("sin(pi / 2)"), 1.0);
    assert_close(eval("cos 0 + sin 0"), 1.0);
    assert_close(eval("e ^ 1"), std::f64::consts::E);
}

// ─────────────────────────────────────────────────────────────────────
// Variables
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_uninitialized_variable() {
    assert_eq!(
        eval("x + 1"),
        Err(CalcError::UninitializedVariable { name: "x".into() })
    );
}

#[test]
fn test_assignment_persists_in_store() {
    let registry = standard();
    let mut store = VariableStore::new();
    assert_eq!(eval_in(&registry, &mut store, "x = 2 + 3"), Ok(5.0));
    assert_eq!(eval_in(&registry, &mut store, "x * 2"), Ok(10.0));
    assert_eq!(eval_in(&registry, &mut store, "y = x = 1"), Ok(1.0));
    assert_eq!(eval_in(&registry, &mut store, "x + y"), Ok(2.0));
}

#[test]
fn test_lone_variable_is_not_a_result() {
    let registry = standard();
    let mut store = VariableStore::new();
    eval_in(&registry, &mut store, "x = 4").unwrap();
    assert_eq!(
        eval_in(&registry, &mut store, "x"),
        Err(CalcError::UnexpectedResultType { name: "x".into() })
    );
    // Brackets are not operations.
    assert_eq!(
        eval_in(&registry, &mut store, "(x)"),
        Err(CalcError::UnexpectedResultType { name: "x".into() })
    );
    assert_eq!(eval_in(&registry, &mut store, "--x"), Ok(4.0));
}

#[test]
fn test_assign_to_number_is_domain_error() {
    assert!(matches!(eval("1 = 2"), Err(CalcError::Domain { .. })));
}

// ─────────────────────────────────────────────────────────────────────
// Domain errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_power_with_negative_base_and_exponent() {
    assert_eq!(
        eval("(-2) ^ (-1)"),
        Err(CalcError::domain("^", "base and exponent are both negative"))
    );
}

#[test]
fn test_error_stops_before_later_assignment() {
    let registry = standard();
    let mut store = VariableStore::new();
    assert!(eval_in(&registry, &mut store, "x = (-1) ^ (-1)").is_err());
    assert_eq!(store.get(store.lookup("x").unwrap()).unwrap().value(), None);
}
