//! Sequence, regex and predicate-protocol matching helpers.

use crate::matcher::match_value;
use crate::pattern::Pattern;
use matchbook_value::{pattern_not_boolean, MatchError, Value};
use regex::Regex;

/// Match a sequence pattern against list or tuple elements.
///
/// A trailing `tail`/`rest` marker makes the pattern open-ended: fixed
/// positions match element-wise, and the remainder (possibly empty) is
/// captured as one list. Without a marker the arity must be exact.
pub(crate) fn match_sequence(
    patterns: &[Pattern],
    items: &[Value],
) -> Result<(bool, Vec<Value>), MatchError> {
    let open_ended = matches!(patterns.last(), Some(Pattern::Tail | Pattern::Rest));
    let fixed = if open_ended {
        &patterns[..patterns.len().saturating_sub(1)]
    } else {
        patterns
    };

    if open_ended {
        if items.len() < fixed.len() {
            return Ok((false, vec![]));
        }
    } else if items.len() != fixed.len() {
        return Ok((false, vec![]));
    }

    let mut captures = Vec::new();
    for (pattern, item) in fixed.iter().zip(items) {
        match pattern {
            // Position-validated at construction: always index 0
            Pattern::Head => captures.push(item.clone()),
            nested => {
                let (matched, extracted) = match_value(nested, item)?;
                if !matched {
                    return Ok((false, vec![]));
                }
                captures.extend(extracted);
            }
        }
    }
    if open_ended {
        captures.push(Value::list(items[fixed.len()..].to_vec()));
    }
    Ok((true, captures))
}

/// Match a regex against a value.
///
/// Non-string values never match. Search semantics: the regex may hit
/// anywhere in the string. Each capture group extracts one item in
/// left-to-right order; a group that did not participate extracts `Nil`.
pub(crate) fn match_regex(re: &Regex, value: &Value) -> (bool, Vec<Value>) {
    let Some(text) = value.as_str() else {
        return (false, vec![]);
    };
    match re.captures(text) {
        Some(caps) => {
            let extracted = caps
                .iter()
                .skip(1)
                .map(|group| group.map_or(Value::Nil, |m| Value::string(m.as_str())))
                .collect();
            (true, extracted)
        }
        None => (false, vec![]),
    }
}

/// Interpret what a predicate returned.
///
/// `Bool(true)` matches and captures the subject; `Bool(false)` does not
/// match. A `(Bool, List)` tuple is the explicit protocol: the predicate
/// decides both the verdict and the captures. Anything else is an error
/// naming the predicate.
pub(crate) fn interpret_predicate_result(
    name: &str,
    result: &Value,
    subject: &Value,
) -> Result<(bool, Vec<Value>), MatchError> {
    match result {
        Value::Bool(true) => Ok((true, vec![subject.clone()])),
        Value::Bool(false) => Ok((false, vec![])),
        Value::Tuple(items) => match (items.first(), items.get(1), items.len()) {
            (Some(Value::Bool(matched)), Some(Value::List(captures)), 2) => {
                Ok((*matched, captures.to_vec()))
            }
            _ => Err(pattern_not_boolean(name, &result.to_string())),
        },
        other => Err(pattern_not_boolean(name, &other.to_string())),
    }
}
