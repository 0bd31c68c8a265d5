//! Structural pattern matching with first-match-wins case chains.
//!
//! A chain pairs patterns with actions and evaluates them in order against
//! one subject; the first matching pattern decides the result:
//!
//! ```
//! use matchbook_match::{caseof, wildcard};
//! use matchbook_value::Value;
//!
//! # fn main() -> Result<(), matchbook_match::CaseError> {
//! let word = caseof(3)
//!     .case(1, "one")?
//!     .case(2, "two")?
//!     .case(3, "three")?
//!     .case(wildcard(), "many")?
//!     .force();
//! assert_eq!(word, Ok(Value::string("three")));
//! # Ok(())
//! # }
//! ```
//!
//! Patterns range from literals through type tests, regexes, sequences
//! with remainder markers, map and record destructuring, predicates, and
//! deferred expressions built from [`x()`]. Actions may be plain values
//! (returned verbatim), host functions (called with the captures), or
//! deferred expressions (applied to what the pattern extracted).
//!
//! Chains are strict: running out of cases without a default is an error.
//! Use [`CaseOf::with_default`] or [`CaseOf::non_strict`] to opt out.

mod caseof;
mod errors;
mod matcher;
mod pattern;
mod structural;

pub use caseof::{caseof, caseof_expr, Action, Case, CaseOf, Subject};
pub use errors::CaseError;
pub use matcher::match_value;
pub use pattern::{head, rest, tail, wildcard, Pattern, TypePattern};

// The placeholder lives in matchbook_expr; re-exported so chains can be
// written against one crate.
pub use matchbook_expr::x;

#[cfg(test)]
mod tests;
