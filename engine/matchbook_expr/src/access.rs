//! Field access, indexing, slicing and calls on evaluated values.

use matchbook_value::{
    index_out_of_bounds, key_not_found, no_field, not_callable, MatchError, MatchResult, Value,
};

/// Resolve a possibly-negative index against a length.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len_i = i64::try_from(len).ok()?;
    let absolute = if index < 0 {
        index.checked_add(len_i)?
    } else {
        index
    };
    if (0..len_i).contains(&absolute) {
        usize::try_from(absolute).ok()
    } else {
        None
    }
}

/// Resolve a slice bound: negative counts from the end, and the result is
/// clamped to `[0, len]`.
fn resolve_bound(bound: i64, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let absolute = if bound < 0 {
        bound.saturating_add(len_i)
    } else {
        bound
    };
    usize::try_from(absolute.clamp(0, len_i)).unwrap_or(len)
}

/// Record field access.
pub(crate) fn get_field(value: &Value, name: &str) -> MatchResult {
    match value {
        Value::Record(record) => record
            .get(name)
            .cloned()
            .ok_or_else(|| no_field(name, record.record_type().name())),
        _ => Err(no_field(name, value.type_name())),
    }
}

/// Index into a list, tuple, string or map.
///
/// Sequence and string indices are integers, counting from the end when
/// negative. String indexing yields a one-character string.
pub(crate) fn get_index(value: &Value, key: &Value) -> MatchResult {
    match (value, key) {
        (Value::List(items) | Value::Tuple(items), Value::Int(index)) => {
            resolve_index(*index, items.len())
                .and_then(|i| items.get(i).cloned())
                .ok_or_else(|| index_out_of_bounds(*index))
        }
        (Value::Str(s), Value::Int(index)) => {
            let chars: Vec<char> = s.chars().collect();
            resolve_index(*index, chars.len())
                .and_then(|i| chars.get(i).copied())
                .map(|c| Value::string(c.to_string()))
                .ok_or_else(|| index_out_of_bounds(*index))
        }
        (Value::Map(map), _) => map.get(key).cloned().ok_or_else(|| key_not_found(key)),
        _ => Err(MatchError::new(format!(
            "type `{}` cannot be indexed with `{}`",
            value.type_name(),
            key.type_name()
        ))),
    }
}

/// Slice a list, tuple or string, with clamped bounds.
pub(crate) fn get_slice(value: &Value, start: Option<i64>, end: Option<i64>) -> MatchResult {
    match value {
        Value::List(items) | Value::Tuple(items) => {
            let lo = start.map_or(0, |b| resolve_bound(b, items.len()));
            let hi = end.map_or(items.len(), |b| resolve_bound(b, items.len()));
            let sliced = if lo < hi {
                items[lo..hi].to_vec()
            } else {
                Vec::new()
            };
            match value {
                Value::Tuple(_) => Ok(Value::tuple(sliced)),
                _ => Ok(Value::list(sliced)),
            }
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let lo = start.map_or(0, |b| resolve_bound(b, chars.len()));
            let hi = end.map_or(chars.len(), |b| resolve_bound(b, chars.len()));
            let sliced: String = if lo < hi {
                chars[lo..hi].iter().collect()
            } else {
                String::new()
            };
            Ok(Value::string(sliced))
        }
        _ => Err(MatchError::new(format!(
            "type `{}` cannot be sliced",
            value.type_name()
        ))),
    }
}

/// Call a function value with frozen arguments.
pub(crate) fn call_value(value: &Value, args: &[Value]) -> MatchResult {
    match value {
        Value::Function(func) => func.call(args),
        _ => Err(not_callable(value.type_name())),
    }
}
