//! Error types for matching and expression evaluation.
//!
//! # Structured Error Categories
//!
//! `MatchErrorKind` provides typed error categories. Factory functions
//! (e.g., `division_by_zero()`) are the public API: they populate both
//! `kind` and `message`, and the `Display` impl produces the same message
//! strings, so callers may match on the kind or format the error directly.

use crate::ops::{BinaryOp, UnaryOp};
use std::fmt;

/// Result of matching or evaluating against runtime values.
pub type MatchResult = Result<Value, MatchError>;

use crate::value::Value;

/// Typed error category.
///
/// Each variant carries structured data for the error condition, enabling
/// programmatic error matching (switch on kind, not string parsing) and
/// machine-readable diagnostic output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchErrorKind {
    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: String,
    },

    // Type/Operator
    InvalidBinaryOp {
        type_name: String,
        op: BinaryOp,
    },
    BinaryTypeMismatch {
        left: String,
        right: String,
    },
    InvalidUnaryOp {
        type_name: String,
        op: UnaryOp,
    },

    // Access
    UndefinedField {
        field: String,
        type_name: String,
    },
    IndexOutOfBounds {
        index: i64,
    },
    KeyNotFound {
        key: String,
    },
    UndefinedMethod {
        method: String,
        type_name: String,
    },

    // Function
    NotCallable {
        type_name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    // Matching
    /// No case matched, the chain is strict and no default was given.
    NoCaseMatched {
        subject: String,
    },
    /// A pattern position requires a boolean result but got something else.
    NonBooleanPattern {
        pattern: String,
        got: String,
    },
    /// The bare placeholder was used directly as a pattern.
    ///
    /// A placeholder with no attached computation matches nothing in
    /// particular; the intent is ambiguous, so it is rejected outright
    /// instead of silently matching everything.
    BarePlaceholderPattern,
    /// An action was selected and then failed while running.
    ActionFailed {
        action: String,
        cause: String,
    },

    /// Catch-all for errors not yet categorized into structured kinds.
    Custom {
        message: String,
    },
}

impl fmt::Display for MatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Arithmetic
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }

            // Type/Operator
            Self::InvalidBinaryOp { type_name, op } => {
                write!(
                    f,
                    "operator `{}` cannot be applied to {type_name}",
                    op.as_symbol()
                )
            }
            Self::BinaryTypeMismatch { left, right } => {
                write!(f, "cannot apply operator to `{left}` and `{right}`")
            }
            Self::InvalidUnaryOp { type_name, op } => {
                write!(
                    f,
                    "unary operator `{}` cannot be applied to {type_name}",
                    op.as_symbol()
                )
            }

            // Access
            Self::UndefinedField { field, type_name } => {
                write!(f, "no field `{field}` on {type_name}")
            }
            Self::IndexOutOfBounds { index } => write!(f, "index {index} out of bounds"),
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),
            Self::UndefinedMethod { method, type_name } => {
                write!(f, "no method '{method}' on type {type_name}")
            }

            // Function
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                if name.is_empty() {
                    write!(f, "expected {expected} {arg_word}, got {got}")
                } else {
                    write!(f, "{name} expects {expected} {arg_word}, got {got}")
                }
            }

            // Matching
            Self::NoCaseMatched { subject } => {
                write!(f, "no case matched and no wildcard or default was given: {subject}")
            }
            Self::NonBooleanPattern { pattern, got } => {
                write!(
                    f,
                    "pattern {pattern} is not returning a boolean, but instead {got}"
                )
            }
            Self::BarePlaceholderPattern => {
                write!(f, "a bare placeholder carries no computation and cannot be a pattern")
            }
            Self::ActionFailed { action, cause } => {
                write!(f, "action lambda `{action}` failed: {cause}")
            }

            // Custom
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Matching or evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchError {
    /// Structured error category.
    pub kind: MatchErrorKind,
    /// Human-readable error message.
    ///
    /// For factory-created errors, this equals `kind.to_string()`.
    pub message: String,
}

impl MatchError {
    /// Create an error with just a message.
    ///
    /// Uses the `Custom` kind. Prefer specific factory functions (e.g.,
    /// `division_by_zero()`) when a structured kind is available.
    pub fn new(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            kind: MatchErrorKind::Custom {
                message: msg.clone(),
            },
            message: msg,
        }
    }

    /// Create an error from a structured kind.
    ///
    /// The message is computed from the kind's `Display` impl.
    fn from_kind(kind: MatchErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for MatchError {}

// Arithmetic Errors

/// Division by zero error.
#[cold]
pub fn division_by_zero() -> MatchError {
    MatchError::from_kind(MatchErrorKind::DivisionByZero)
}

/// Modulo by zero error.
#[cold]
pub fn modulo_by_zero() -> MatchError {
    MatchError::from_kind(MatchErrorKind::ModuloByZero)
}

/// Integer overflow error.
#[cold]
pub fn integer_overflow(operation: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Operator Errors

/// Invalid operator for a specific type with operator context.
#[cold]
pub fn invalid_binary_op_for(type_name: &str, op: BinaryOp) -> MatchError {
    MatchError::from_kind(MatchErrorKind::InvalidBinaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

/// Type mismatch in binary operation.
#[cold]
pub fn binary_type_mismatch(left: &str, right: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::BinaryTypeMismatch {
        left: left.to_string(),
        right: right.to_string(),
    })
}

/// Invalid unary operator for a type.
#[cold]
pub fn invalid_unary_op(type_name: &str, op: UnaryOp) -> MatchError {
    MatchError::from_kind(MatchErrorKind::InvalidUnaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

// Access Errors

/// No such field on a value.
#[cold]
pub fn no_field(field: &str, type_name: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::UndefinedField {
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

/// Index out of bounds.
#[cold]
pub fn index_out_of_bounds(index: i64) -> MatchError {
    MatchError::from_kind(MatchErrorKind::IndexOutOfBounds { index })
}

/// Key not found in map.
#[cold]
pub fn key_not_found(key: &Value) -> MatchError {
    MatchError::from_kind(MatchErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

/// No such method on a type.
#[cold]
pub fn no_such_method(method: &str, type_name: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::UndefinedMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

// Function Errors

/// Value is not callable.
#[cold]
pub fn not_callable(type_name: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

/// Wrong argument count for a function or method.
#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> MatchError {
    MatchError::from_kind(MatchErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Wrong field count when constructing a record.
#[cold]
pub fn record_arity_mismatch(type_name: &str, expected: usize, got: usize) -> MatchError {
    MatchError::from_kind(MatchErrorKind::ArityMismatch {
        name: type_name.to_string(),
        expected,
        got,
    })
}

// Matching Errors

/// No case matched under strict policy.
#[cold]
pub fn no_case_matched(subject: &Value) -> MatchError {
    MatchError::from_kind(MatchErrorKind::NoCaseMatched {
        subject: subject.to_string(),
    })
}

/// A pattern produced a non-boolean result.
#[cold]
pub fn pattern_not_boolean(pattern: &str, got: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::NonBooleanPattern {
        pattern: pattern.to_string(),
        got: got.to_string(),
    })
}

/// The bare placeholder was used directly as a pattern.
#[cold]
pub fn bare_placeholder_pattern() -> MatchError {
    MatchError::from_kind(MatchErrorKind::BarePlaceholderPattern)
}

/// An action was selected and then failed while running.
#[cold]
pub fn action_failed(action: &str, cause: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::ActionFailed {
        action: action.to_string(),
        cause: cause.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_messages_match_kind_display() {
        let err = division_by_zero();
        assert_eq!(err.message, err.kind.to_string());

        let err = wrong_arg_count("upper", 0, 2);
        assert_eq!(err.message, "upper expects 0 arguments, got 2");
    }

    #[test]
    fn action_failure_embeds_cause() {
        let err = action_failed("describe", "index 7 out of bounds");
        assert!(err.message.contains("lambda"));
        assert!(err.message.contains("describe"));
        assert!(err.message.contains("index 7 out of bounds"));
    }

    #[test]
    fn no_case_matched_names_subject() {
        let err = no_case_matched(&Value::int(3));
        assert!(err.message.contains('3'));
    }
}
