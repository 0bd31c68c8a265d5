//! Binary operator implementations for deferred expressions.
//!
//! Direct enum-based dispatch over a fixed value-type set. Equality,
//! identity and membership are value-kind-agnostic and handled before the
//! typed dispatch; everything else pairs on operand kinds, with integer
//! operands widening to float when mixed with one.

use matchbook_value::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op_for,
    modulo_by_zero, BinaryOp, Heap, MatchError, MatchResult, Value,
};

/// Evaluate a binary operation on two values.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Public API consumed by callers passing owned Values; references would force cloning at call sites"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> MatchResult {
    // Kind-agnostic operators first: they apply across every value pair.
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(left.equals(&right))),
        BinaryOp::NotEq => return Ok(Value::Bool(!left.equals(&right))),
        BinaryOp::Is => return Ok(Value::Bool(is_same(&left, &right))),
        BinaryOp::In => return eval_membership(&left, &right),
        _ => {}
    }

    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        // Mixed numeric operands widen to float
        (Value::Int(_), Value::Float(b)) => match left.as_float() {
            Some(a) => eval_float_binary(a, *b, op),
            None => Err(binary_type_mismatch(left.type_name(), right.type_name())),
        },
        (Value::Float(a), Value::Int(_)) => match right.as_float() {
            Some(b) => eval_float_binary(*a, b, op),
            None => Err(binary_type_mismatch(left.type_name(), right.type_name())),
        },
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            eval_string_repeat(s, *n, op)
        }
        (Value::List(a), Value::List(b)) => eval_sequence_binary(a, b, op, Value::list, "lists"),
        (Value::Tuple(a), Value::Tuple(b)) => {
            eval_sequence_binary(a, b, op, Value::tuple, "tuples")
        }
        (Value::List(items), Value::Int(n)) | (Value::Int(n), Value::List(items)) => {
            eval_sequence_repeat(items, *n, op, Value::list, "list")
        }
        (Value::Tuple(items), Value::Int(n)) | (Value::Int(n), Value::Tuple(items)) => {
            eval_sequence_repeat(items, *n, op, Value::tuple, "tuple")
        }
        _ => Err(binary_type_mismatch(left.type_name(), right.type_name())),
    }
}

/// Identity test: same allocation for heap values, same bits for scalars.
fn is_same(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a.ptr_eq(b),
        (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a.ptr_eq(b),
        (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
        (Value::Record(a), Value::Record(b)) => a == b,
        (Value::Function(a), Value::Function(b)) => a == b,
        _ => false,
    }
}

/// Membership test: `item in container`.
fn eval_membership(item: &Value, container: &Value) -> MatchResult {
    match container {
        Value::List(items) | Value::Tuple(items) => {
            Ok(Value::Bool(items.iter().any(|v| v.equals(item))))
        }
        Value::Map(map) => Ok(Value::Bool(map.contains_key(item))),
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(Value::Bool(haystack.contains(needle.as_str()))),
            _ => Err(binary_type_mismatch(item.type_name(), container.type_name())),
        },
        _ => Err(invalid_binary_op_for(container.type_name(), BinaryOp::In)),
    }
}

/// Checked arithmetic operation with overflow handling.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> MatchResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Floor division rounding toward negative infinity.
fn checked_floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

/// Modulo whose result carries the divisor's sign.
fn checked_mod_floored(a: i64, b: i64) -> Option<i64> {
    let remainder = a.checked_rem(b)?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        remainder.checked_add(b)
    } else {
        Some(remainder)
    }
}

/// Binary operations on integers.
///
/// `Div` always widens to float; `FloorDiv` and `Mod` round toward
/// negative infinity; `Pow` stays integral for non-negative exponents and
/// widens otherwise.
#[expect(
    clippy::cast_precision_loss,
    reason = "Int-to-float widening accepts precision loss above 2^53"
)]
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> MatchResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a as f64 / b as f64))
            }
        }
        BinaryOp::FloorDiv => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(checked_floor_div(a, b), "floor division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(checked_mod_floored(a, b), "remainder")
            }
        }
        BinaryOp::Pow => match u32::try_from(b) {
            Ok(exp) => checked_arith(a.checked_pow(exp), "exponentiation"),
            // Negative exponent widens to float
            Err(_) => Ok(Value::Float((a as f64).powf(b as f64))),
        },
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::BitAnd => Ok(Value::Int(a & b)),
        BinaryOp::BitOr => Ok(Value::Int(a | b)),
        BinaryOp::BitXor => Ok(Value::Int(a ^ b)),
        BinaryOp::Shl => u32::try_from(b)
            .ok()
            .and_then(|amount| a.checked_shl(amount))
            .map(Value::Int)
            .ok_or_else(|| {
                MatchError::new(format!("shift amount {b} out of range (0-63)"))
            }),
        BinaryOp::Shr => u32::try_from(b)
            .ok()
            .and_then(|amount| a.checked_shr(amount))
            .map(Value::Int)
            .ok_or_else(|| {
                MatchError::new(format!("shift amount {b} out of range (0-63)"))
            }),
        _ => Err(invalid_binary_op_for("integers", op)),
    }
}

/// Binary operations on floats.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> MatchResult {
    use std::cmp::Ordering;
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float(a / b))
            }
        }
        BinaryOp::FloorDiv => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Float((a / b).floor()))
            }
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                Err(modulo_by_zero())
            } else {
                let remainder = a % b;
                // Result carries the divisor's sign
                if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                    Ok(Value::Float(remainder + b))
                } else {
                    Ok(Value::Float(remainder))
                }
            }
        }
        BinaryOp::Pow => Ok(Value::Float(a.powf(b))),
        // partial_cmp for IEEE 754 compliant comparisons (NaN != NaN)
        BinaryOp::Lt => Ok(Value::Bool(a.partial_cmp(&b) == Some(Ordering::Less))),
        BinaryOp::LtEq => Ok(Value::Bool(matches!(
            a.partial_cmp(&b),
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::Gt => Ok(Value::Bool(a.partial_cmp(&b) == Some(Ordering::Greater))),
        BinaryOp::GtEq => Ok(Value::Bool(matches!(
            a.partial_cmp(&b),
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        _ => Err(invalid_binary_op_for("floats", op)),
    }
}

/// Binary operations on booleans.
fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> MatchResult {
    match op {
        BinaryOp::BitAnd => Ok(Value::Bool(a & b)),
        BinaryOp::BitOr => Ok(Value::Bool(a | b)),
        BinaryOp::BitXor => Ok(Value::Bool(a ^ b)),
        _ => Err(invalid_binary_op_for("booleans", op)),
    }
}

/// Binary operations on strings.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> MatchResult {
    match op {
        BinaryOp::Add => Ok(Value::string(format!("{a}{b}"))),
        // Lexicographic comparison
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op_for("strings", op)),
    }
}

/// String repetition: `"ab" * 3`. A non-positive count yields the empty
/// string.
fn eval_string_repeat(s: &str, n: i64, op: BinaryOp) -> MatchResult {
    match op {
        BinaryOp::Mul => {
            let count = usize::try_from(n).unwrap_or(0);
            Ok(Value::string(s.repeat(count)))
        }
        _ => Err(invalid_binary_op_for("string and int", op)),
    }
}

/// Binary operations on two sequences of the same kind.
fn eval_sequence_binary(
    a: &Heap<Vec<Value>>,
    b: &Heap<Vec<Value>>,
    op: BinaryOp,
    wrap: fn(Vec<Value>) -> Value,
    type_name: &'static str,
) -> MatchResult {
    match op {
        BinaryOp::Add => {
            let mut result = (**a).clone();
            result.extend_from_slice(b);
            Ok(wrap(result))
        }
        _ => Err(invalid_binary_op_for(type_name, op)),
    }
}

/// Sequence repetition: `[1, 2] * 3`. A non-positive count yields the
/// empty sequence.
fn eval_sequence_repeat(
    items: &Heap<Vec<Value>>,
    n: i64,
    op: BinaryOp,
    wrap: fn(Vec<Value>) -> Value,
    type_name: &'static str,
) -> MatchResult {
    match op {
        BinaryOp::Mul => {
            let count = usize::try_from(n).unwrap_or(0);
            let mut result = Vec::with_capacity(items.len().saturating_mul(count));
            for _ in 0..count {
                result.extend_from_slice(items);
            }
            Ok(wrap(result))
        }
        _ => Err(invalid_binary_op_for(type_name, op)),
    }
}
