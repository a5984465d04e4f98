use std::borrow::Cow;
use std::fmt;

use strum::{Display, EnumIter, IntoStaticStr};

use crate::{
    ast::{
        ArrayAccess, UnevaluableExpression,
        hints::{Hints, OptimizerHints},
    },
    evaluator::{EvalContext, EvalError, Expression},
    value::Value,
};

/// Expression node of a compiled query.
///
/// Equality and hashing are structural: two nodes are equal when they are the
/// same variant with equal fields, no matter where they live in memory. This
/// lets rewrite passes deduplicate and match subtrees by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Element or range selection on arrays
    ///
    /// # Examples
    /// ```text
    /// [*]
    /// [0]
    /// [1:3]
    /// ```
    ArrayAccess(ArrayAccess),

    /// Statically failing computation, carrying its diagnostic
    Unevaluable(UnevaluableExpression),
}

/// Variant tag of an [`Expr`], usable without a node at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum ExprKind {
    ArrayAccess,
    Unevaluable,
}

impl ExprKind {
    /// Optimizer metadata declared by the kind.
    pub const fn hints(self) -> Hints {
        match self {
            ExprKind::ArrayAccess => ArrayAccess::HINTS,
            ExprKind::Unevaluable => UnevaluableExpression::HINTS,
        }
    }

    /// Starting value of [`Expr::structural_hash`] for this kind.
    const fn seed(self) -> u64 {
        match self {
            ExprKind::ArrayAccess => 0x41_72_72,
            ExprKind::Unevaluable => 0x55_6e_65,
        }
    }
}

const HASH_FACTOR: u64 = 47;

fn fold(hash: u64, field: u64) -> u64 {
    hash.wrapping_mul(HASH_FACTOR).wrapping_add(field)
}

impl Expr {
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::ArrayAccess(_) => ExprKind::ArrayAccess,
            Expr::Unevaluable(_) => ExprKind::Unevaluable,
        }
    }

    pub fn hints(&self) -> Hints {
        self.kind().hints()
    }

    /// Hash of the node that is identical across processes and platforms.
    ///
    /// The kind seed is folded with every declared field in order, as
    /// `hash = 47 * hash + field`. Equal nodes always produce equal values.
    pub fn structural_hash(&self) -> u64 {
        let seed = self.kind().seed();
        match self {
            Expr::ArrayAccess(access) => {
                let hash = fold(seed, access.start_index() as u64);
                fold(hash, access.end_index() as u64)
            }
            Expr::Unevaluable(sentinel) => sentinel
                .message()
                .bytes()
                .fold(seed, |hash, byte| fold(hash, byte as u64)),
        }
    }

    fn as_expression(&self) -> &dyn Expression {
        match self {
            Expr::ArrayAccess(access) => access as &dyn Expression,
            Expr::Unevaluable(sentinel) => sentinel,
        }
    }
}

impl Expression for Expr {
    fn evaluate<'a>(
        &self,
        doc: &'a Value,
        ctx: &EvalContext,
    ) -> Result<Cow<'a, Value>, EvalError> {
        self.as_expression().evaluate(doc, ctx)
    }

    fn set(&self, doc: &mut Value, value: Value, ctx: &EvalContext) -> Result<(), EvalError> {
        self.as_expression().set(doc, value, ctx)
    }

    fn render(&self, out: &mut String) {
        self.as_expression().render(out)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<ArrayAccess> for Expr {
    fn from(access: ArrayAccess) -> Self {
        Expr::ArrayAccess(access)
    }
}

impl From<UnevaluableExpression> for Expr {
    fn from(sentinel: UnevaluableExpression) -> Self {
        Expr::Unevaluable(sentinel)
    }
}
