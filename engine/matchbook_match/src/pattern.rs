//! Pattern kinds and construction-time validation.

use crate::caseof::CaseOf;
use crate::errors::CaseError;
use matchbook_expr::Expr;
use matchbook_value::{FunctionValue, MatchResult, RecordType, Value};
use regex::Regex;
use std::sync::Arc;

/// A value-kind test, capturing the whole value on success.
#[derive(Clone, Debug)]
pub enum TypePattern {
    /// Matches any integer.
    Int,
    /// Matches any float.
    Float,
    /// Matches any boolean.
    Bool,
    /// Matches any string.
    Str,
    /// Matches any list.
    List,
    /// Matches any tuple.
    Tuple,
    /// Matches any map.
    Map,
    /// Matches any function value.
    Function,
    /// Matches `Nil`.
    Nil,
    /// Matches instances of the record type or any of its subtypes.
    Record(Arc<RecordType>),
}

impl TypePattern {
    /// Whether the value is of this kind.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (TypePattern::Int, Value::Int(_))
            | (TypePattern::Float, Value::Float(_))
            | (TypePattern::Bool, Value::Bool(_))
            | (TypePattern::Str, Value::Str(_))
            | (TypePattern::List, Value::List(_))
            | (TypePattern::Tuple, Value::Tuple(_))
            | (TypePattern::Map, Value::Map(_))
            | (TypePattern::Function, Value::Function(_))
            | (TypePattern::Nil, Value::Nil) => true,
            // Type tests honor the record parent chain
            (TypePattern::Record(ty), Value::Record(r)) => r.is_instance_of(ty),
            _ => false,
        }
    }
}

/// A structural pattern over runtime values.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Matches a value structurally equal to the literal; captures nothing.
    Literal(Value),
    /// Matches by value kind; captures the whole value.
    Type(TypePattern),
    /// Matches when the predicate holds; see the predicate protocol on
    /// [`crate::match_value`].
    Predicate(FunctionValue),
    /// Matches a string by regex search; each capture group extracts one
    /// item.
    Regex(Regex),
    /// Matches a list or tuple element-wise.
    Sequence(Vec<Pattern>),
    /// Matches map entries pairwise; non-exhaustive over the subject's
    /// keys.
    Map(Vec<(Pattern, Pattern)>),
    /// Matches instances of exactly this record type, field by field.
    Record {
        /// The required type, by descriptor identity.
        ty: Arc<RecordType>,
        /// One pattern per field, in declaration order.
        fields: Vec<Pattern>,
    },
    /// Matches anything; captures the whole value.
    Wildcard,
    /// First-element wildcard inside a sequence; captures the element.
    Head,
    /// Remainder marker inside a sequence; captures the rest as a list.
    Tail,
    /// Alias of [`Pattern::Tail`] with a distinct spelling.
    Rest,
    /// Matches when the deferred expression yields `Bool(true)`; captures
    /// nothing, leaving the action to fall back to the subject.
    Expr(Expr),
    /// A nested case chain used as a predicate.
    Chain(Box<CaseOf>),
}

impl Pattern {
    /// Literal pattern from any value-convertible input.
    pub fn literal(value: impl Into<Value>) -> Pattern {
        Pattern::Literal(value.into())
    }

    /// Predicate pattern from a named host closure.
    pub fn predicate(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> MatchResult + Send + Sync + 'static,
    ) -> Pattern {
        Pattern::Predicate(FunctionValue::new(name, func))
    }

    /// Regex pattern compiled from source text.
    ///
    /// Matching uses search semantics: the regex may hit anywhere in the
    /// subject unless anchored explicitly.
    pub fn regex(source: &str) -> Result<Pattern, regex::Error> {
        Ok(Pattern::Regex(Regex::new(source)?))
    }

    /// Sequence pattern over elements.
    #[must_use]
    pub fn seq(elements: Vec<Pattern>) -> Pattern {
        Pattern::Sequence(elements)
    }

    /// Map pattern over key/value pattern pairs, in pairing priority order.
    #[must_use]
    pub fn map(entries: Vec<(Pattern, Pattern)>) -> Pattern {
        Pattern::Map(entries)
    }

    /// Record destructuring pattern.
    #[must_use]
    pub fn record(ty: &Arc<RecordType>, fields: Vec<Pattern>) -> Pattern {
        Pattern::Record {
            ty: Arc::clone(ty),
            fields,
        }
    }

    pub(crate) fn marker_name(&self) -> &'static str {
        match self {
            Pattern::Head => "head",
            Pattern::Tail => "tail",
            Pattern::Rest => "rest",
            _ => "",
        }
    }

    /// Reject patterns that can never match as written.
    pub(crate) fn validate(&self) -> Result<(), CaseError> {
        match self {
            Pattern::Head | Pattern::Tail | Pattern::Rest => {
                Err(CaseError::MarkerOutsideSequence {
                    marker: self.marker_name(),
                })
            }
            Pattern::Sequence(elements) => validate_sequence(elements),
            Pattern::Map(entries) => {
                for (key, value) in entries {
                    key.validate()?;
                    value.validate()?;
                }
                Ok(())
            }
            Pattern::Record { fields, .. } => {
                for field in fields {
                    field.validate()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn validate_sequence(elements: &[Pattern]) -> Result<(), CaseError> {
    let heads = elements
        .iter()
        .filter(|p| matches!(p, Pattern::Head))
        .count();
    if heads > 1 {
        return Err(CaseError::DuplicateMarker { marker: "head" });
    }
    let remainders = elements
        .iter()
        .filter(|p| matches!(p, Pattern::Tail | Pattern::Rest))
        .count();
    if remainders > 1 {
        return Err(CaseError::DuplicateMarker { marker: "tail" });
    }

    let last = elements.len().saturating_sub(1);
    for (position, element) in elements.iter().enumerate() {
        match element {
            Pattern::Head => {
                if position != 0 {
                    return Err(CaseError::HeadNotFirst { position });
                }
            }
            Pattern::Tail | Pattern::Rest => {
                if position != last {
                    return Err(CaseError::MarkerNotLast {
                        marker: element.marker_name(),
                        position,
                    });
                }
            }
            nested => nested.validate()?,
        }
    }
    Ok(())
}

// Conversions

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::Literal(value)
    }
}

impl From<i64> for Pattern {
    fn from(n: i64) -> Self {
        Pattern::Literal(Value::int(n))
    }
}

impl From<f64> for Pattern {
    fn from(f: f64) -> Self {
        Pattern::Literal(Value::float(f))
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Value::Bool(b))
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Value::string(s))
    }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(elements: Vec<Pattern>) -> Self {
        Pattern::Sequence(elements)
    }
}

impl From<TypePattern> for Pattern {
    fn from(ty: TypePattern) -> Self {
        Pattern::Type(ty)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Regex(re)
    }
}

impl From<Expr> for Pattern {
    fn from(expr: Expr) -> Self {
        Pattern::Expr(expr)
    }
}

impl From<FunctionValue> for Pattern {
    fn from(func: FunctionValue) -> Self {
        Pattern::Predicate(func)
    }
}

impl From<CaseOf> for Pattern {
    fn from(chain: CaseOf) -> Self {
        Pattern::Chain(Box::new(chain))
    }
}

/// The anything wildcard: matches every value and captures it.
#[must_use]
pub fn wildcard() -> Pattern {
    Pattern::Wildcard
}

/// First-element wildcard for sequence patterns.
#[must_use]
pub fn head() -> Pattern {
    Pattern::Head
}

/// Remainder marker for sequence patterns; captures the rest as a list.
#[must_use]
pub fn tail() -> Pattern {
    Pattern::Tail
}

/// Alias of [`tail()`].
#[must_use]
pub fn rest() -> Pattern {
    Pattern::Rest
}
