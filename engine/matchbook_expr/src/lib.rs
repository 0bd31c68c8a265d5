//! Deferred expressions: reusable unary functions built with operator syntax.
//!
//! The entry point is [`x()`], the identity placeholder. Applying Rust
//! operators and accessor methods to it grows an expression tree instead of
//! computing anything; [`Expr::apply`] later evaluates that tree against a
//! concrete subject value:
//!
//! ```
//! use matchbook_expr::x;
//! use matchbook_value::Value;
//!
//! let double_plus_one = x() * 2 + 1;
//! assert_eq!(double_plus_one.apply(&Value::int(10)), Ok(Value::int(21)));
//! ```
//!
//! Expressions are immutable and cheaply cloneable, so a single built
//! expression can be applied to any number of subjects and embedded in any
//! number of case chains.

mod access;
mod binary;
mod expr;
mod methods;
mod unary;

pub use binary::evaluate_binary;
pub use expr::{Expr, Operand, Side};
pub use unary::evaluate_unary;

/// The identity placeholder: the seed every deferred expression grows from.
#[must_use]
pub fn x() -> Expr {
    Expr::Identity
}

/// Lift a host function into a deferred expression over its arguments.
///
/// Each argument may itself be deferred; all are evaluated against the
/// subject before the call:
///
/// ```
/// use matchbook_expr::{x, xfn};
/// use matchbook_value::{FunctionValue, Value};
///
/// let add = FunctionValue::new("add", |args: &[Value]| {
///     Ok(Value::int(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0)))
/// });
/// let expr = xfn(add, vec![x().into(), (x() + 1).into()]);
/// assert_eq!(expr.apply(&Value::int(1)), Ok(Value::int(3)));
/// ```
#[must_use]
pub fn xfn(func: matchbook_value::FunctionValue, args: Vec<Operand>) -> Expr {
    Expr::Invoke { func, args }
}

#[cfg(test)]
mod tests;
