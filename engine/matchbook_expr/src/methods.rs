//! Built-in method dispatch for deferred expressions.
//!
//! A small fixed surface: string case and whitespace helpers, `len` on
//! collections, `abs` on numbers. Dispatch is by receiver kind and name.

use matchbook_value::{
    integer_overflow, no_such_method, wrong_arg_count, MatchResult, Value,
};

/// Invoke a built-in method on a value.
pub(crate) fn dispatch_method(value: &Value, name: &str, args: &[Value]) -> MatchResult {
    // Every built-in method is nullary
    if !args.is_empty() {
        return Err(wrong_arg_count(name, 0, args.len()));
    }

    match (value, name) {
        (Value::Str(s), "upper") => Ok(Value::string(s.to_uppercase())),
        (Value::Str(s), "lower") => Ok(Value::string(s.to_lowercase())),
        (Value::Str(s), "trim") => Ok(Value::string(s.trim())),
        (Value::Str(s), "len") => Ok(Value::Int(length(s.chars().count()))),
        (Value::List(items) | Value::Tuple(items), "len") => {
            Ok(Value::Int(length(items.len())))
        }
        (Value::Map(map), "len") => Ok(Value::Int(length(map.len()))),
        (Value::Int(n), "abs") => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("absolute value")),
        (Value::Float(f), "abs") => Ok(Value::Float(f.abs())),
        _ => Err(no_such_method(name, value.type_name())),
    }
}

fn length(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
