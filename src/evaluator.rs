use std::borrow::Cow;

use thiserror::Error;

use crate::value::Value;

/// How a range [`ArrayAccess`](crate::ast::ArrayAccess) writes back into an
/// array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeWrite {
    /// Walk the destination range and fill each position with the element
    /// found at ascending source positions `0, 1, 2, ...` of the document
    /// being written. The value handed to `set` is not consulted, and a
    /// destination written early in the walk is visible to later reads.
    #[default]
    SelfCopy,

    /// Spread the elements of the value handed to `set` over the destination
    /// range, in walk order. The value must be an array; missing elements are
    /// written as null.
    Spread,
}

/// Evaluation context forwarded unchanged through every expression.
///
/// Node kinds in this crate only read its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalContext {
    /// Write-back behavior of range array accesses
    pub range_write: RangeWrite,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new context with a different range write-back mode
    pub fn with_range_write(&self, range_write: RangeWrite) -> Self {
        EvalContext { range_write }
    }
}

/// Errors that can occur while evaluating or writing through an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Type mismatch or invalid operation for the given type
    #[error("Type error: {0}")]
    TypeError(String),

    /// A resolved index that does not address an existing array element
    #[error("Index {index} out of bounds for array of size {size}")]
    IndexOutOfBounds { index: i64, size: usize },

    /// A computation known to fail, carrying its diagnostic verbatim
    #[error("{0}")]
    Unevaluable(String),

    /// The expression has no write-back semantics
    #[error("Cannot set a value through expression {expression}")]
    UnsupportedSet { expression: String },
}

/// The contract shared by every expression node.
///
/// Implementors are immutable after construction, so one node can be
/// evaluated from many threads at once. Structural equality and hashing are
/// expected through `PartialEq`/`Hash` on the implementing type.
pub trait Expression: std::fmt::Debug + Send + Sync {
    /// Transforms `doc` into this expression's output.
    ///
    /// A borrowed result is a reference into `doc` itself (or to a static),
    /// returned without copying.
    fn evaluate<'a>(&self, doc: &'a Value, ctx: &EvalContext)
        -> Result<Cow<'a, Value>, EvalError>;

    /// Writes `value` at the position this expression addresses in `doc`.
    ///
    /// The document is changed in place; a kind addressing the whole document
    /// replaces it. Writes made before a failure stay in the document. Kinds
    /// without write-back semantics fail with [`EvalError::UnsupportedSet`]
    /// and leave `doc` untouched, which is what this default does.
    fn set(&self, doc: &mut Value, value: Value, ctx: &EvalContext) -> Result<(), EvalError> {
        let _ = (doc, value, ctx);
        Err(EvalError::UnsupportedSet {
            expression: self.to_text(),
        })
    }

    /// Appends the canonical text of this expression to `out`.
    fn render(&self, out: &mut String);

    fn to_text(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }
}

/// Evaluates an expression and hands back an owned value.
///
/// This is a convenience for callers that do not care whether the result
/// borrows from the input.
///
/// # Examples
///
/// ```
/// use jexpr::{ArrayAccess, EvalContext, Value, evaluator::eval_owned};
///
/// let doc = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
/// let result = eval_owned(&ArrayAccess::index(-1), &doc, &EvalContext::new()).unwrap();
/// assert_eq!(result, Value::Integer(2));
/// ```
pub fn eval_owned<E: Expression + ?Sized>(
    expr: &E,
    doc: &Value,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    expr.evaluate(doc, ctx).map(Cow::into_owned)
}
