#![deny(clippy::arithmetic_side_effects)]
//! Matchbook Values - runtime value types for the matchbook engine.
//!
//! This crate provides:
//! - The dynamic runtime value type (`Value`, `Heap`, `OrderedMap`,
//!   `RecordType`, `RecordValue`, `FunctionValue`)
//! - Operator enums shared by the expression evaluator (`BinaryOp`, `UnaryOp`)
//! - Evaluation error types (`MatchError`, `MatchResult`)
//!
//! # Value Types
//!
//! The value module provides runtime values with enforced Arc usage:
//! - All heap allocations go through `Value::` factory methods
//! - `Heap<T>` wrapper enforces this invariant
//! - Thread-safe reference counting via `Arc`
//!
//! Records are the structured-object analog of a host-language dataclass:
//! a `RecordType` descriptor (name, optional parent type, field names) is
//! created once and shared by every instance, so instance tests and
//! subtype tests are pointer walks rather than reflection.

mod errors;
mod ops;
mod value;

pub use errors::{MatchError, MatchErrorKind, MatchResult};
pub use ops::{BinaryOp, UnaryOp};
pub use value::{
    FunctionValue, Heap, NativeFn, OrderedMap, RecordType, RecordValue, Value,
};

// Re-export error constructors for use by other crates
pub use errors::{
    action_failed, bare_placeholder_pattern, binary_type_mismatch, division_by_zero,
    index_out_of_bounds, integer_overflow, invalid_binary_op_for, invalid_unary_op,
    key_not_found, modulo_by_zero, no_case_matched, no_field, no_such_method, not_callable,
    pattern_not_boolean, record_arity_mismatch, wrong_arg_count,
};
