use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use crate::{
    ast::hints::OptimizerHints,
    evaluator::{EvalContext, EvalError, Expression},
    value::Value,
};

/// A computation that is known to fail.
///
/// Rewrite passes put this in place of a subexpression they have proven can
/// never succeed. The failure, together with its diagnostic, is deferred
/// until the expression is evaluated. Two sentinels with the same message are
/// interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnevaluableExpression {
    message: String,
}

// Never looks at its input, so it is valid in any scope.
impl OptimizerHints for UnevaluableExpression {}

impl UnevaluableExpression {
    pub fn new(message: impl Into<String>) -> Self {
        UnevaluableExpression {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Expression for UnevaluableExpression {
    fn evaluate<'a>(
        &self,
        _doc: &'a Value,
        _ctx: &EvalContext,
    ) -> Result<Cow<'a, Value>, EvalError> {
        debug!(message = %self.message, "evaluating unevaluable expression");
        Err(EvalError::Unevaluable(self.message.clone()))
    }

    fn render(&self, out: &mut String) {
        out.push_str(&self.message);
    }
}

impl fmt::Display for UnevaluableExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
