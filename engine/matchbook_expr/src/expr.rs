//! The deferred expression tree and its builder surface.

use crate::{access, binary::evaluate_binary, methods, unary::evaluate_unary};
use matchbook_value::{BinaryOp, FunctionValue, MatchResult, UnaryOp, Value};
use std::fmt;

/// The non-placeholder side of a deferred binary operation.
///
/// Either a concrete value frozen at build time, or another deferred
/// expression evaluated against the same subject (as in `x() + x()`).
#[derive(Clone, Debug)]
pub enum Operand {
    /// A concrete value, fixed when the expression is built.
    Value(Value),
    /// A nested deferred expression, applied to the same subject.
    Expr(Box<Expr>),
}

impl Operand {
    fn eval(&self, subject: &Value) -> MatchResult {
        match self {
            Operand::Value(value) => Ok(value.clone()),
            Operand::Expr(expr) => expr.apply(subject),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<Expr> for Operand {
    fn from(expr: Expr) -> Self {
        Operand::Expr(Box::new(expr))
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Value(Value::int(n))
    }
}

impl From<f64> for Operand {
    fn from(f: f64) -> Self {
        Operand::Value(Value::float(f))
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Value(Value::Bool(b))
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Value(Value::string(s))
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Value(Value::string(s))
    }
}

impl From<Vec<Value>> for Operand {
    fn from(items: Vec<Value>) -> Self {
        Operand::Value(Value::list(items))
    }
}

/// Which side of a binary operation the placeholder chain occupies.
///
/// `x() - 1` puts the chain on the left; the reflected form `(1 - x)`
/// built with [`Expr::rsub`] puts it on the right. Non-commutative
/// operators need the distinction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The chain is the left operand.
    Left,
    /// The chain is the right operand.
    Right,
}

/// A deferred expression: a unary function from subject to value.
///
/// Built by applying operators and accessors to [`crate::x()`]; evaluated
/// with [`Expr::apply`]. The tree is immutable, so every builder method
/// consumes `self` and returns a new node wrapping it.
#[derive(Clone, Debug)]
pub enum Expr {
    /// The bare placeholder: applying it returns the subject unchanged.
    Identity,
    /// A unary operation on an inner expression.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand expression.
        inner: Box<Expr>,
    },
    /// A binary operation between an inner expression and an operand.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// The placeholder-chain side.
        inner: Box<Expr>,
        /// The other side, frozen at build time.
        operand: Operand,
        /// Which side `inner` occupies.
        side: Side,
    },
    /// Field access on a record result.
    Field {
        /// The expression producing the record.
        inner: Box<Expr>,
        /// The field name.
        name: String,
    },
    /// Indexing into a list, tuple, string or map result.
    Index {
        /// The expression producing the container.
        inner: Box<Expr>,
        /// The index or key, frozen at build time.
        key: Value,
    },
    /// Slicing a list, tuple or string result.
    Slice {
        /// The expression producing the sequence.
        inner: Box<Expr>,
        /// Inclusive start, negative counts from the end; `None` means 0.
        start: Option<i64>,
        /// Exclusive end, negative counts from the end; `None` means length.
        end: Option<i64>,
    },
    /// Calling a function result with frozen arguments.
    Call {
        /// The expression producing the callable.
        inner: Box<Expr>,
        /// Arguments, frozen at build time.
        args: Vec<Value>,
    },
    /// A fixed host function applied to deferred arguments.
    ///
    /// The mirror image of [`Expr::Call`]: there the subject produces the
    /// callable and the arguments are frozen, here the callable is frozen
    /// and each argument is evaluated against the subject.
    Invoke {
        /// The host function.
        func: FunctionValue,
        /// Deferred arguments, each evaluated against the subject.
        args: Vec<Operand>,
    },
    /// Invoking a built-in method on the result.
    Method {
        /// The expression producing the receiver.
        inner: Box<Expr>,
        /// The method name.
        name: String,
        /// Arguments, frozen at build time.
        args: Vec<Value>,
    },
}

impl Expr {
    /// Evaluate against a concrete subject.
    #[tracing::instrument(level = "trace", skip_all, fields(expr = %self))]
    pub fn apply(&self, subject: &Value) -> MatchResult {
        match self {
            Expr::Identity => Ok(subject.clone()),
            Expr::Unary { op, inner } => evaluate_unary(inner.apply(subject)?, *op),
            Expr::Binary {
                op,
                inner,
                operand,
                side,
            } => {
                let chain = inner.apply(subject)?;
                let other = operand.eval(subject)?;
                match side {
                    Side::Left => evaluate_binary(chain, other, *op),
                    Side::Right => evaluate_binary(other, chain, *op),
                }
            }
            Expr::Field { inner, name } => access::get_field(&inner.apply(subject)?, name),
            Expr::Index { inner, key } => access::get_index(&inner.apply(subject)?, key),
            Expr::Slice { inner, start, end } => {
                access::get_slice(&inner.apply(subject)?, *start, *end)
            }
            Expr::Call { inner, args } => access::call_value(&inner.apply(subject)?, args),
            Expr::Invoke { func, args } => {
                let mut evaluated = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated.push(arg.eval(subject)?);
                }
                func.call(&evaluated)
            }
            Expr::Method { inner, name, args } => {
                methods::dispatch_method(&inner.apply(subject)?, name, args)
            }
        }
    }

    /// Whether this is the bare placeholder with nothing applied.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self, Expr::Identity)
    }

    fn binary(self, op: BinaryOp, operand: impl Into<Operand>, side: Side) -> Expr {
        Expr::Binary {
            op,
            inner: Box::new(self),
            operand: operand.into(),
            side,
        }
    }

    fn unary(self, op: UnaryOp) -> Expr {
        Expr::Unary {
            op,
            inner: Box::new(self),
        }
    }
}

// Builder Methods: operations without a Rust operator form

impl Expr {
    /// Exponentiation: `self ** rhs`.
    #[must_use]
    pub fn pow(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Pow, rhs, Side::Left)
    }

    /// Floor division: `self // rhs`, rounding toward negative infinity.
    #[must_use]
    pub fn floor_div(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::FloorDiv, rhs, Side::Left)
    }

    /// Structural equality test: `self == rhs`.
    #[must_use]
    pub fn eq_(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Eq, rhs, Side::Left)
    }

    /// Structural inequality test: `self != rhs`.
    #[must_use]
    pub fn ne_(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::NotEq, rhs, Side::Left)
    }

    /// Less-than comparison: `self < rhs`.
    #[must_use]
    pub fn lt(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Lt, rhs, Side::Left)
    }

    /// Less-or-equal comparison: `self <= rhs`.
    #[must_use]
    pub fn le(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::LtEq, rhs, Side::Left)
    }

    /// Greater-than comparison: `self > rhs`.
    #[must_use]
    pub fn gt(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Gt, rhs, Side::Left)
    }

    /// Greater-or-equal comparison: `self >= rhs`.
    #[must_use]
    pub fn ge(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::GtEq, rhs, Side::Left)
    }

    /// Membership test: `self in container`.
    #[must_use]
    pub fn in_(self, container: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::In, container, Side::Left)
    }

    /// Reverse membership test: `item in self`.
    #[must_use]
    pub fn contains(self, item: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::In, item, Side::Right)
    }

    /// Identity test: `self is rhs` (same allocation, not structural).
    #[must_use]
    pub fn is_(self, rhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Is, rhs, Side::Left)
    }

    /// Logical negation by truthiness: `not self`.
    #[must_use]
    pub fn not_(self) -> Expr {
        self.unary(UnaryOp::Not)
    }

    /// Unary plus: `+self` (numeric identity).
    #[must_use]
    pub fn pos(self) -> Expr {
        self.unary(UnaryOp::Pos)
    }
}

// Builder Methods: reflected forms, the chain on the right-hand side

impl Expr {
    /// Reflected addition: `lhs + self`.
    #[must_use]
    pub fn radd(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Add, lhs, Side::Right)
    }

    /// Reflected subtraction: `lhs - self`.
    #[must_use]
    pub fn rsub(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Sub, lhs, Side::Right)
    }

    /// Reflected multiplication: `lhs * self`.
    #[must_use]
    pub fn rmul(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Mul, lhs, Side::Right)
    }

    /// Reflected division: `lhs / self`.
    #[must_use]
    pub fn rdiv(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Div, lhs, Side::Right)
    }

    /// Reflected floor division: `lhs // self`.
    #[must_use]
    pub fn rfloor_div(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::FloorDiv, lhs, Side::Right)
    }

    /// Reflected remainder: `lhs % self`.
    #[must_use]
    pub fn rrem(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Mod, lhs, Side::Right)
    }

    /// Reflected exponentiation: `lhs ** self`.
    #[must_use]
    pub fn rpow(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Pow, lhs, Side::Right)
    }

    /// Reflected left shift: `lhs << self`.
    #[must_use]
    pub fn rshl(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Shl, lhs, Side::Right)
    }

    /// Reflected right shift: `lhs >> self`.
    #[must_use]
    pub fn rshr(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Shr, lhs, Side::Right)
    }

    /// Reflected less-than: `lhs < self`.
    #[must_use]
    pub fn rlt(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Lt, lhs, Side::Right)
    }

    /// Reflected less-or-equal: `lhs <= self`.
    #[must_use]
    pub fn rle(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::LtEq, lhs, Side::Right)
    }

    /// Reflected greater-than: `lhs > self`.
    #[must_use]
    pub fn rgt(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::Gt, lhs, Side::Right)
    }

    /// Reflected greater-or-equal: `lhs >= self`.
    #[must_use]
    pub fn rge(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::GtEq, lhs, Side::Right)
    }

    /// Reflected bitwise and: `lhs & self`.
    #[must_use]
    pub fn rbit_and(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::BitAnd, lhs, Side::Right)
    }

    /// Reflected bitwise or: `lhs | self`.
    #[must_use]
    pub fn rbit_or(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::BitOr, lhs, Side::Right)
    }

    /// Reflected bitwise xor: `lhs ^ self`.
    #[must_use]
    pub fn rbit_xor(self, lhs: impl Into<Operand>) -> Expr {
        self.binary(BinaryOp::BitXor, lhs, Side::Right)
    }
}

// Builder Methods: access, calls and built-in methods

impl Expr {
    /// Record field access: `self.name`.
    #[must_use]
    pub fn field(self, name: impl Into<String>) -> Expr {
        Expr::Field {
            inner: Box::new(self),
            name: name.into(),
        }
    }

    /// Index into the result: `self[key]`.
    ///
    /// Lists, tuples and strings take integer keys (negative counts from
    /// the end); maps take any value key.
    #[must_use]
    pub fn index(self, key: impl Into<Value>) -> Expr {
        Expr::Index {
            inner: Box::new(self),
            key: key.into(),
        }
    }

    /// Slice the result: `self[start:end]`, clamped like a slice literal.
    #[must_use]
    pub fn slice(self, start: Option<i64>, end: Option<i64>) -> Expr {
        Expr::Slice {
            inner: Box::new(self),
            start,
            end,
        }
    }

    /// Call the result as a function with frozen arguments.
    #[must_use]
    pub fn call(self, args: Vec<Value>) -> Expr {
        Expr::Call {
            inner: Box::new(self),
            args,
        }
    }

    /// Invoke a built-in method on the result, e.g. `upper` or `len`.
    #[must_use]
    pub fn method(self, name: impl Into<String>, args: Vec<Value>) -> Expr {
        Expr::Method {
            inner: Box::new(self),
            name: name.into(),
            args,
        }
    }
}

// Operator Trait Implementations

impl<T: Into<Operand>> std::ops::Add<T> for Expr {
    type Output = Expr;

    fn add(self, rhs: T) -> Expr {
        self.binary(BinaryOp::Add, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::Sub<T> for Expr {
    type Output = Expr;

    fn sub(self, rhs: T) -> Expr {
        self.binary(BinaryOp::Sub, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::Mul<T> for Expr {
    type Output = Expr;

    fn mul(self, rhs: T) -> Expr {
        self.binary(BinaryOp::Mul, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::Div<T> for Expr {
    type Output = Expr;

    fn div(self, rhs: T) -> Expr {
        self.binary(BinaryOp::Div, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::Rem<T> for Expr {
    type Output = Expr;

    fn rem(self, rhs: T) -> Expr {
        self.binary(BinaryOp::Mod, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::Shl<T> for Expr {
    type Output = Expr;

    fn shl(self, rhs: T) -> Expr {
        self.binary(BinaryOp::Shl, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::Shr<T> for Expr {
    type Output = Expr;

    fn shr(self, rhs: T) -> Expr {
        self.binary(BinaryOp::Shr, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::BitAnd<T> for Expr {
    type Output = Expr;

    fn bitand(self, rhs: T) -> Expr {
        self.binary(BinaryOp::BitAnd, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::BitOr<T> for Expr {
    type Output = Expr;

    fn bitor(self, rhs: T) -> Expr {
        self.binary(BinaryOp::BitOr, rhs, Side::Left)
    }
}

impl<T: Into<Operand>> std::ops::BitXor<T> for Expr {
    type Output = Expr;

    fn bitxor(self, rhs: T) -> Expr {
        self.binary(BinaryOp::BitXor, rhs, Side::Left)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.unary(UnaryOp::Neg)
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    /// `!expr` is bitwise inversion on integers; use [`Expr::not_`] for
    /// logical negation by truthiness.
    fn not(self) -> Expr {
        self.unary(UnaryOp::BitNot)
    }
}

// Display

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Value(value) => write!(f, "{value}"),
            Operand::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Value]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identity => write!(f, "x"),
            Expr::Unary { op, inner } => write!(f, "{}{inner}", op.as_symbol()),
            Expr::Binary {
                op,
                inner,
                operand,
                side,
            } => match side {
                Side::Left => write!(f, "({inner} {} {operand})", op.as_symbol()),
                Side::Right => write!(f, "({operand} {} {inner})", op.as_symbol()),
            },
            Expr::Field { inner, name } => write!(f, "{inner}.{name}"),
            Expr::Index { inner, key } => write!(f, "{inner}[{key}]"),
            Expr::Slice { inner, start, end } => {
                write!(f, "{inner}[")?;
                if let Some(start) = start {
                    write!(f, "{start}")?;
                }
                write!(f, ":")?;
                if let Some(end) = end {
                    write!(f, "{end}")?;
                }
                write!(f, "]")
            }
            Expr::Call { inner, args } => {
                write!(f, "{inner}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Expr::Method { inner, name, args } => {
                write!(f, "{inner}.{name}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Expr::Invoke { func, args } => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
