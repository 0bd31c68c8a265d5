//! Tests for binary and unary operator implementations.

use crate::binary::evaluate_binary;
use crate::unary::evaluate_unary;
use matchbook_value::{BinaryOp, UnaryOp, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_int_operations() {
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Add).unwrap(),
        Value::int(5)
    );
    assert_eq!(
        evaluate_binary(Value::int(5), Value::int(3), BinaryOp::Sub).unwrap(),
        Value::int(2)
    );
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Mul).unwrap(),
        Value::int(6)
    );
}

#[test]
fn test_division_widens_to_float() {
    assert_eq!(
        evaluate_binary(Value::int(1), Value::int(2), BinaryOp::Div).unwrap(),
        Value::float(0.5)
    );
    assert_eq!(
        evaluate_binary(Value::int(7), Value::int(2), BinaryOp::Div).unwrap(),
        Value::float(3.5)
    );
}

#[test]
fn test_floor_division_rounds_toward_negative_infinity() {
    assert_eq!(
        evaluate_binary(Value::int(7), Value::int(2), BinaryOp::FloorDiv).unwrap(),
        Value::int(3)
    );
    assert_eq!(
        evaluate_binary(Value::int(-7), Value::int(2), BinaryOp::FloorDiv).unwrap(),
        Value::int(-4)
    );
    assert_eq!(
        evaluate_binary(Value::int(7), Value::int(-2), BinaryOp::FloorDiv).unwrap(),
        Value::int(-4)
    );
    assert_eq!(
        evaluate_binary(Value::int(1), Value::int(2), BinaryOp::FloorDiv).unwrap(),
        Value::int(0)
    );
}

#[test]
fn test_modulo_sign_follows_divisor() {
    assert_eq!(
        evaluate_binary(Value::int(7), Value::int(2), BinaryOp::Mod).unwrap(),
        Value::int(1)
    );
    assert_eq!(
        evaluate_binary(Value::int(-7), Value::int(2), BinaryOp::Mod).unwrap(),
        Value::int(1)
    );
    assert_eq!(
        evaluate_binary(Value::int(7), Value::int(-2), BinaryOp::Mod).unwrap(),
        Value::int(-1)
    );
}

#[test]
fn test_exponentiation() {
    assert_eq!(
        evaluate_binary(Value::int(6), Value::int(5), BinaryOp::Pow).unwrap(),
        Value::int(7776)
    );
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(0), BinaryOp::Pow).unwrap(),
        Value::int(1)
    );
    // Negative exponent widens to float
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(-1), BinaryOp::Pow).unwrap(),
        Value::float(0.5)
    );
}

#[test]
fn test_division_by_zero() {
    assert!(evaluate_binary(Value::int(1), Value::int(0), BinaryOp::Div).is_err());
    assert!(evaluate_binary(Value::int(1), Value::int(0), BinaryOp::FloorDiv).is_err());
    assert!(evaluate_binary(Value::int(1), Value::int(0), BinaryOp::Mod).is_err());
    assert!(evaluate_binary(Value::float(1.0), Value::float(0.0), BinaryOp::Div).is_err());
}

#[test]
fn test_shifts_and_bitwise() {
    assert_eq!(
        evaluate_binary(Value::int(1), Value::int(3), BinaryOp::Shl).unwrap(),
        Value::int(8)
    );
    assert_eq!(
        evaluate_binary(Value::int(8), Value::int(2), BinaryOp::Shr).unwrap(),
        Value::int(2)
    );
    assert_eq!(
        evaluate_binary(Value::int(6), Value::int(3), BinaryOp::BitAnd).unwrap(),
        Value::int(2)
    );
    assert_eq!(
        evaluate_binary(Value::int(6), Value::int(3), BinaryOp::BitOr).unwrap(),
        Value::int(7)
    );
    assert_eq!(
        evaluate_binary(Value::int(6), Value::int(3), BinaryOp::BitXor).unwrap(),
        Value::int(5)
    );
    assert!(evaluate_binary(Value::int(1), Value::int(-1), BinaryOp::Shl).is_err());
}

#[test]
fn test_comparisons() {
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Lt).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(Value::int(3), Value::int(2), BinaryOp::Gt).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(2), BinaryOp::Eq).unwrap(),
        Value::Bool(true)
    );
    // Equality crosses the int/float boundary
    assert_eq!(
        evaluate_binary(Value::int(1), Value::float(1.0), BinaryOp::Eq).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(Value::int(1), Value::float(1.5), BinaryOp::Lt).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_string_concatenation_and_repetition() {
    assert_eq!(
        evaluate_binary(Value::string("hello"), Value::string(" world"), BinaryOp::Add).unwrap(),
        Value::string("hello world")
    );
    assert_eq!(
        evaluate_binary(Value::string("ab"), Value::int(3), BinaryOp::Mul).unwrap(),
        Value::string("ababab")
    );
    assert_eq!(
        evaluate_binary(Value::string("ab"), Value::int(-1), BinaryOp::Mul).unwrap(),
        Value::string("")
    );
}

#[test]
fn test_list_concatenation_and_repetition() {
    assert_eq!(
        evaluate_binary(
            Value::list(vec![Value::int(1)]),
            Value::list(vec![Value::int(2)]),
            BinaryOp::Add,
        )
        .unwrap(),
        Value::list(vec![Value::int(1), Value::int(2)])
    );
    assert_eq!(
        evaluate_binary(Value::list(vec![Value::int(1)]), Value::int(3), BinaryOp::Mul).unwrap(),
        Value::list(vec![Value::int(1), Value::int(1), Value::int(1)])
    );
}

#[test]
fn test_membership() {
    let list = Value::list(vec![Value::int(1), Value::int(2)]);
    assert_eq!(
        evaluate_binary(Value::int(2), list.clone(), BinaryOp::In).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(Value::int(9), list, BinaryOp::In).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_binary(Value::string("ell"), Value::string("hello"), BinaryOp::In).unwrap(),
        Value::Bool(true)
    );
    let map = Value::map_from(vec![(Value::string("a"), Value::int(1))]);
    assert_eq!(
        evaluate_binary(Value::string("a"), map, BinaryOp::In).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_identity_vs_equality() {
    let a = Value::string("shared");
    let same = a.clone();
    let other = Value::string("shared");

    assert_eq!(
        evaluate_binary(a.clone(), same, BinaryOp::Is).unwrap(),
        Value::Bool(true)
    );
    // Structurally equal, distinct allocations
    assert_eq!(
        evaluate_binary(a.clone(), other.clone(), BinaryOp::Is).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_binary(a, other, BinaryOp::Eq).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_type_mismatch() {
    assert!(evaluate_binary(Value::int(1), Value::Bool(true), BinaryOp::Add).is_err());
    assert!(evaluate_binary(Value::string("a"), Value::int(1), BinaryOp::Add).is_err());
}

#[test]
fn test_unary_operations() {
    assert_eq!(
        evaluate_unary(Value::int(5), UnaryOp::Neg).unwrap(),
        Value::int(-5)
    );
    assert_eq!(
        evaluate_unary(Value::float(2.5), UnaryOp::Neg).unwrap(),
        Value::float(-2.5)
    );
    assert_eq!(
        evaluate_unary(Value::int(5), UnaryOp::Pos).unwrap(),
        Value::int(5)
    );
    // Bitwise inversion: !n == -n - 1
    assert_eq!(
        evaluate_unary(Value::int(1), UnaryOp::BitNot).unwrap(),
        Value::int(-2)
    );
    assert!(evaluate_unary(Value::string("a"), UnaryOp::Neg).is_err());
    assert!(evaluate_unary(Value::int(i64::MIN), UnaryOp::Neg).is_err());
}

#[test]
fn test_logical_not_uses_truthiness() {
    assert_eq!(
        evaluate_unary(Value::Bool(true), UnaryOp::Not).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_unary(Value::list(vec![]), UnaryOp::Not).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_unary(Value::string("x"), UnaryOp::Not).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_unary(Value::Nil, UnaryOp::Not).unwrap(),
        Value::Bool(true)
    );
}
