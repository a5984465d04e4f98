pub mod ast;
pub mod evaluator;
pub mod output;
pub mod value;

pub use ast::{ArrayAccess, Expr, ExprKind, Hints, OptimizerHints, Scope, UnevaluableExpression};
pub use evaluator::{EvalContext, EvalError, Expression, RangeWrite};
pub use output::{to_json, to_json_pretty};
pub use value::{NULL, Value};
