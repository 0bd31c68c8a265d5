//! Unary operator implementations for deferred expressions.

use matchbook_value::{integer_overflow, invalid_unary_op, MatchResult, UnaryOp, Value};

/// Evaluate a unary operation on a value.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Public API consumed by callers passing owned Values; references would force cloning at call sites"
)]
pub fn evaluate_unary(value: Value, op: UnaryOp) -> MatchResult {
    match op {
        UnaryOp::Neg => match &value {
            Value::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Value::Float(f) => Ok(Value::Float(-f)),
            _ => Err(invalid_unary_op(value.type_name(), op)),
        },
        UnaryOp::Pos => match &value {
            Value::Int(_) | Value::Float(_) => Ok(value.clone()),
            _ => Err(invalid_unary_op(value.type_name(), op)),
        },
        // Logical negation works on any value through truthiness
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        UnaryOp::BitNot => match &value {
            Value::Int(n) => Ok(Value::Int(!n)),
            _ => Err(invalid_unary_op(value.type_name(), op)),
        },
    }
}
