//! First-match-wins case chains.

use crate::errors::CaseError;
use crate::matcher::match_value;
use crate::pattern::Pattern;
use matchbook_expr::Expr;
use matchbook_value::{action_failed, no_case_matched, FunctionValue, MatchResult, Value};

/// What to produce when a case matches.
#[derive(Clone, Debug)]
pub enum Action {
    /// Returned verbatim, never invoked, callable or not.
    Value(Value),
    /// Called with the captures as positional arguments, or with the
    /// subject when the pattern captured nothing.
    Function(FunctionValue),
    /// Applied to the single capture, to the captures as one list when
    /// there are several, or to the subject when there are none.
    Expr(Expr),
}

impl From<Value> for Action {
    fn from(value: Value) -> Self {
        Action::Value(value)
    }
}

impl From<FunctionValue> for Action {
    fn from(func: FunctionValue) -> Self {
        Action::Function(func)
    }
}

impl From<Expr> for Action {
    fn from(expr: Expr) -> Self {
        Action::Expr(expr)
    }
}

impl From<i64> for Action {
    fn from(n: i64) -> Self {
        Action::Value(Value::int(n))
    }
}

impl From<f64> for Action {
    fn from(f: f64) -> Self {
        Action::Value(Value::float(f))
    }
}

impl From<bool> for Action {
    fn from(b: bool) -> Self {
        Action::Value(Value::Bool(b))
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        Action::Value(Value::string(s))
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        Action::Value(Value::string(s))
    }
}

/// A nested chain as an action: the captures (or the subject) become the
/// argument of the forced chain function.
impl From<CaseOf> for Action {
    fn from(chain: CaseOf) -> Self {
        Action::Function(chain.to_function())
    }
}

impl Action {
    /// Produce the result for a matched case.
    fn run(&self, subject: &Value, captures: Vec<Value>) -> MatchResult {
        match self {
            Action::Value(value) => Ok(value.clone()),
            Action::Function(func) => {
                let args = if captures.is_empty() {
                    vec![subject.clone()]
                } else {
                    captures
                };
                func.call(&args)
                    .map_err(|cause| action_failed(func.name(), &cause.message))
            }
            Action::Expr(expr) => {
                let input = match captures.len() {
                    0 => subject.clone(),
                    1 => captures.into_iter().next().unwrap_or(Value::Nil),
                    _ => Value::list(captures),
                };
                expr.apply(&input)
                    .map_err(|cause| action_failed(&expr.to_string(), &cause.message))
            }
        }
    }
}

/// One validated `(pattern, action)` pair.
#[derive(Clone, Debug)]
pub struct Case {
    pattern: Pattern,
    action: Action,
}

impl Case {
    /// Pair a pattern with an action, rejecting malformed patterns.
    pub fn new(pattern: impl Into<Pattern>, action: impl Into<Action>) -> Result<Case, CaseError> {
        let pattern = pattern.into();
        pattern.validate()?;
        Ok(Case {
            pattern,
            action: action.into(),
        })
    }
}

/// What the chain matches against.
#[derive(Clone, Debug)]
pub enum Subject {
    /// A concrete value, matched when the chain is forced.
    Value(Value),
    /// A deferred expression; forcing the chain yields a function that
    /// applies the expression to its argument and then runs the cases.
    Deferred(Expr),
}

/// A first-match-wins chain of cases over one subject.
///
/// Cases are tried in the order they were added; the first whose pattern
/// matches decides the result. Chains are strict by default: exhausting
/// the cases with no default is an error rather than a silent fallthrough.
#[derive(Clone, Debug)]
pub struct CaseOf {
    subject: Subject,
    cases: Vec<Case>,
    default: Option<Value>,
    strict: bool,
}

/// Start a chain over a concrete subject.
pub fn caseof(subject: impl Into<Value>) -> CaseOf {
    CaseOf {
        subject: Subject::Value(subject.into()),
        cases: Vec::new(),
        default: None,
        strict: true,
    }
}

/// Start a chain over a deferred subject.
///
/// Forcing such a chain produces a reusable function instead of a value;
/// see [`CaseOf::force`].
#[must_use]
pub fn caseof_expr(subject: Expr) -> CaseOf {
    CaseOf {
        subject: Subject::Deferred(subject),
        cases: Vec::new(),
        default: None,
        strict: true,
    }
}

impl CaseOf {
    /// Append a case; fails if the pattern is malformed.
    pub fn case(
        mut self,
        pattern: impl Into<Pattern>,
        action: impl Into<Action>,
    ) -> Result<Self, CaseError> {
        self.cases.push(Case::new(pattern, action)?);
        Ok(self)
    }

    /// Append an already-built case.
    #[must_use]
    pub fn push(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    /// Produce this value when no case matches, verbatim.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// On exhaustion without a default, produce `Bool(false)` instead of
    /// an error.
    #[must_use]
    pub fn non_strict(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Require a match: exhaustion without a default is an error naming
    /// the subject.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Evaluate the chain.
    ///
    /// A concrete subject is matched through the cases directly. A
    /// deferred subject instead yields a `Value::Function` that reruns the
    /// whole chain per call: the argument goes through the subject
    /// expression and then through the cases. Multiple arguments collapse
    /// into one list subject.
    pub fn force(&self) -> MatchResult {
        match &self.subject {
            Subject::Value(subject) => self.run(subject),
            Subject::Deferred(_) => Ok(Value::Function(self.to_function())),
        }
    }

    /// Run the cases against a candidate, routing it through a deferred
    /// subject expression first. Used when a chain serves as a pattern or
    /// as a forced function.
    pub(crate) fn run_with_subject(&self, candidate: &Value) -> MatchResult {
        match &self.subject {
            Subject::Deferred(expr) => {
                let subject = expr.apply(candidate)?;
                self.run(&subject)
            }
            Subject::Value(subject) => self.run(subject),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(subject = %subject))]
    fn run(&self, subject: &Value) -> MatchResult {
        for case in &self.cases {
            let (matched, captures) = match_value(&case.pattern, subject)?;
            if matched {
                return case.action.run(subject, captures);
            }
        }
        if let Some(default) = &self.default {
            return Ok(default.clone());
        }
        if self.strict {
            Err(no_case_matched(subject))
        } else {
            Ok(Value::Bool(false))
        }
    }

    fn to_function(&self) -> FunctionValue {
        let chain = self.clone();
        FunctionValue::new("caseof", move |args: &[Value]| {
            let candidate = match args {
                [] => Value::Nil,
                [single] => single.clone(),
                many => Value::list(many.to_vec()),
            };
            chain.run_with_subject(&candidate)
        })
    }
}
