//! The structural matching core: one pattern against one value.

use crate::pattern::Pattern;
use crate::structural::{interpret_predicate_result, match_regex, match_sequence};
use matchbook_value::{bare_placeholder_pattern, pattern_not_boolean, MatchError, Value};
use rustc_hash::FxHashSet;

/// Match a pattern against a value.
///
/// Returns the verdict and the captures extracted in left-to-right order.
/// An `Err` is not a failed match but a broken pattern: a predicate that
/// returned a non-boolean, a bare placeholder, or a deferred expression
/// that could not be evaluated against the subject.
#[tracing::instrument(level = "trace", skip_all)]
pub fn match_value(pattern: &Pattern, value: &Value) -> Result<(bool, Vec<Value>), MatchError> {
    match pattern {
        Pattern::Literal(literal) => Ok((literal.equals(value), vec![])),
        Pattern::Type(ty) => {
            if ty.matches(value) {
                Ok((true, vec![value.clone()]))
            } else {
                Ok((false, vec![]))
            }
        }
        Pattern::Wildcard => Ok((true, vec![value.clone()])),
        Pattern::Predicate(func) => {
            let result = func.call(&[value.clone()])?;
            interpret_predicate_result(func.name(), &result, value)
        }
        Pattern::Regex(re) => Ok(match_regex(re, value)),
        Pattern::Sequence(elements) => match value.as_slice() {
            Some(items) => match_sequence(elements, items),
            None => Ok((false, vec![])),
        },
        Pattern::Map(entries) => match value {
            Value::Map(map) => match_map(entries, map.iter()),
            _ => Ok((false, vec![])),
        },
        Pattern::Record { ty, fields } => match value {
            Value::Record(record) if record.is_exactly(ty) => {
                if fields.len() != record.values().len() {
                    return Ok((false, vec![]));
                }
                let mut captures = Vec::new();
                for (field_pattern, field_value) in fields.iter().zip(record.values()) {
                    let (matched, extracted) = match_value(field_pattern, field_value)?;
                    if !matched {
                        return Ok((false, vec![]));
                    }
                    captures.extend(extracted);
                }
                Ok((true, captures))
            }
            _ => Ok((false, vec![])),
        },
        Pattern::Expr(expr) => {
            if expr.is_identity() {
                return Err(bare_placeholder_pattern());
            }
            // Expression patterns capture nothing: the action's
            // zero-capture fallback hands it the subject instead.
            match expr.apply(value)? {
                Value::Bool(true) => Ok((true, vec![])),
                Value::Bool(false) => Ok((false, vec![])),
                other => Err(pattern_not_boolean(
                    &expr.to_string(),
                    &other.to_string(),
                )),
            }
        }
        Pattern::Chain(chain) => {
            let result = chain.run_with_subject(value)?;
            interpret_predicate_result("caseof", &result, value)
        }
        Pattern::Head | Pattern::Tail | Pattern::Rest => Err(MatchError::new(format!(
            "sequence marker `{}` used outside a sequence pattern",
            pattern.marker_name()
        ))),
    }
}

/// Greedy pairing of map-pattern entries against subject entries.
///
/// Pattern pairs claim subject entries in declared order; each pair takes
/// the first unclaimed entry whose key and value both match. A pair that
/// can claim nothing fails the whole pattern with no captures. Subject
/// entries beyond the pattern are ignored.
fn match_map<'a>(
    entries: &[(Pattern, Pattern)],
    subject: impl Iterator<Item = &'a (Value, Value)> + Clone,
) -> Result<(bool, Vec<Value>), MatchError> {
    let mut claimed: FxHashSet<usize> = FxHashSet::default();
    let mut captures = Vec::new();

    'pairs: for (key_pattern, value_pattern) in entries {
        for (index, (key, value)) in subject.clone().enumerate() {
            if claimed.contains(&index) {
                continue;
            }
            let (key_matched, key_extracted) = match_value(key_pattern, key)?;
            if !key_matched {
                continue;
            }
            let (value_matched, value_extracted) = match_value(value_pattern, value)?;
            if !value_matched {
                continue;
            }
            claimed.insert(index);
            captures.extend(key_extracted);
            captures.extend(value_extracted);
            continue 'pairs;
        }
        return Ok((false, vec![]));
    }
    Ok((true, captures))
}
