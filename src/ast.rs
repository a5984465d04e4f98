//! # Expression Nodes
//!
//! This module defines the expression nodes of a JSON document query. Every
//! node can be read through and written through:
//!
//! - **evaluate** transforms an input document into an output value
//! - **set** writes a value back at the position the node addresses
//!
//! ## Architecture Overview
//!
//! - **[hints]** - Optimizer metadata declared per node kind
//! - **[expressions]** - The [`Expr`] sum type and its kind tags
//! - **[array_access]** - Element and range selection on arrays
//! - **[unevaluable]** - Sentinel for computations known to fail
//!
//! ## Core Concepts
//!
//! ### Structural Identity
//!
//! Nodes never mutate after construction. Two nodes are equal when they are
//! the same kind with equal fields, and equal nodes hash equal, so a rewrite
//! pass may deduplicate or match subtrees by value.
//!
//! ### Canonical Text
//!
//! Nodes render into a caller-owned buffer, so a parent node renders itself
//! by appending its children's text:
//!
//! ```text
//! [*]      ArrayAccess::all()
//! [2]      ArrayAccess::index(2)
//! [1:3]    ArrayAccess::range(1, 3)
//! ```
//!
//! ### Negative Array Indices
//!
//! ```text
//! [-1]     last element
//! [-2:-1]  last two elements
//! ```
pub mod array_access;
pub mod expressions;
pub mod hints;
pub mod unevaluable;

pub use array_access::{ArrayAccess, resolve_index};
pub use expressions::{Expr, ExprKind};
pub use hints::{Hints, OptimizerHints, Scope};
pub use unevaluable::UnevaluableExpression;
