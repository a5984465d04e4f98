use strum::{Display, EnumIter};

use crate::value::Value;

/// Input shapes an expression kind may legally receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Scope {
    Any,
    Array,
    Object,
    Scalar,
}

impl Scope {
    /// Whether a value of this shape is a legal input for the scope.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Scope::Any => true,
            Scope::Array => value.is_array(),
            Scope::Object => value.is_object(),
            Scope::Scalar => value.is_scalar(),
        }
    }
}

/// Optimizer metadata of one expression kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hints {
    pub scope: Scope,
    /// Applied once per element when placed beneath an array-producing
    /// expression, rather than once to the whole array. Only declared here;
    /// the per-element loop belongs to the caller.
    pub iterating: bool,
}

impl Hints {
    pub const DEFAULT: Hints = Hints {
        scope: Scope::Any,
        iterating: false,
    };
}

impl Default for Hints {
    fn default() -> Self {
        Hints::DEFAULT
    }
}

/// Per-kind optimizer metadata, readable from the type alone.
///
/// Kinds override only the constants that differ from the defaults.
///
/// ```
/// use jexpr::ast::{ArrayAccess, OptimizerHints, Scope};
///
/// assert_eq!(ArrayAccess::SCOPE, Scope::Array);
/// assert!(ArrayAccess::HINTS.iterating);
/// ```
pub trait OptimizerHints {
    const SCOPE: Scope = Scope::Any;
    const ITERATING: bool = false;
    const HINTS: Hints = Hints {
        scope: Self::SCOPE,
        iterating: Self::ITERATING,
    };
}
