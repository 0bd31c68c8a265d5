//! Native function values.

use super::Value;
use crate::errors::MatchResult;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Signature of a native function payload.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> MatchResult + Send + Sync>;

/// Function value wrapping a host closure.
///
/// # Immutable Captures
///
/// The closure is frozen behind an `Arc` at creation time, with no
/// interior mutability, so function values are safe to share across
/// threads and reuse across chain evaluations.
#[derive(Clone)]
pub struct FunctionValue {
    name: String,
    func: NativeFn,
}

impl FunctionValue {
    /// Wrap a host closure under a diagnostic name.
    ///
    /// The name appears in error messages when the function fails as an
    /// action or misbehaves as a predicate.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> MatchResult + Send + Sync + 'static,
    ) -> Self {
        FunctionValue {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with positional arguments.
    pub fn call(&self, args: &[Value]) -> MatchResult {
        (self.func)(args)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({})", self.name)
    }
}

impl PartialEq for FunctionValue {
    /// Functions are equal by closure identity.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for FunctionValue {}

impl Hash for FunctionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
