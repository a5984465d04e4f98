use std::borrow::Cow;
use std::fmt::{self, Write};

use tracing::{debug, trace};

use crate::{
    ast::hints::{OptimizerHints, Scope},
    evaluator::{EvalContext, EvalError, Expression, RangeWrite},
    value::{NULL, Value},
};

/// Selects one element or an inclusive range of elements of an array.
///
/// Negative indices count from the end of the array: the size of the array is
/// added to them. When the start index lies behind the end index the range is
/// walked backwards, so the selected elements come out reversed.
///
/// # Examples
///
/// ```text
/// [*]      all elements, the input array itself
/// [2]      third element
/// [-1]     last element
/// [1:3]    second to fourth element
/// [3:1]    fourth to second element, reversed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayAccess {
    start_index: i64,
    end_index: i64,
}

impl OptimizerHints for ArrayAccess {
    const SCOPE: Scope = Scope::Array;
    const ITERATING: bool = true;
}

impl Default for ArrayAccess {
    fn default() -> Self {
        Self::all()
    }
}

impl ArrayAccess {
    /// Access that reproduces any input array.
    pub const fn all() -> Self {
        Self::range(0, -1)
    }

    /// Access to the single element at `index`.
    pub const fn index(index: i64) -> Self {
        Self::range(index, index)
    }

    /// Access to the elements from `start_index` to `end_index`, both
    /// inclusive. The indices are stored as given.
    pub const fn range(start_index: i64, end_index: i64) -> Self {
        ArrayAccess {
            start_index,
            end_index,
        }
    }

    pub fn start_index(&self) -> i64 {
        self.start_index
    }

    pub fn end_index(&self) -> i64 {
        self.end_index
    }

    /// True if any incoming array is reproduced wholly.
    pub fn is_selecting_all(&self) -> bool {
        self.start_index == 0 && self.end_index == -1
    }

    /// True if more than one position is addressed.
    pub fn is_selecting_range(&self) -> bool {
        self.start_index != self.end_index
    }

    /// Resolved start and end positions together with the walk step.
    fn walk(&self, size: usize) -> (i64, i64, i64) {
        let start = resolve_index(self.start_index, size);
        let end = resolve_index(self.end_index, size);
        let step = if start < end { 1 } else { -1 };
        (start, end, step)
    }
}

/// Turns a possibly negative index into a position from the array front.
///
/// No clamping happens: the result may still lie outside the array.
pub fn resolve_index(index: i64, size: usize) -> i64 {
    if index < 0 {
        size as i64 + index
    } else {
        index
    }
}

/// Inclusive walk from `start` to `end` by `step`.
///
/// Every visited position lies between the two bounds, so only the distance
/// needs the wider type.
fn positions(start: i64, end: i64, step: i64) -> impl Iterator<Item = i64> {
    let count = (end as i128 - start as i128).unsigned_abs() + 1;
    (0..count).map(move |k| (start as i128 + step as i128 * k as i128) as i64)
}

/// Fails unless `index` addresses an existing element of an array of `size`.
fn check_position(index: i64, size: usize) -> Result<(), EvalError> {
    match usize::try_from(index) {
        Ok(i) if i < size => Ok(()),
        _ => Err(EvalError::IndexOutOfBounds { index, size }),
    }
}

impl Expression for ArrayAccess {
    fn evaluate<'a>(
        &self,
        doc: &'a Value,
        _ctx: &EvalContext,
    ) -> Result<Cow<'a, Value>, EvalError> {
        if self.is_selecting_all() {
            trace!(expr = %self, "selecting whole array");
            return Ok(Cow::Borrowed(doc));
        }

        let size = doc.array_len()?;

        if self.is_selecting_range() {
            let (start, end, step) = self.walk(size);
            trace!(expr = %self, start, end, step, "selecting range");
            // the walk is contiguous, so checking both bounds covers it
            check_position(start, size)?;
            check_position(end, size)?;
            let selected = positions(start, end, step)
                .map(|index| Ok::<_, EvalError>(doc.array_get(index)?.cloned().unwrap_or_default()))
                .collect::<Result<Vec<_>, EvalError>>()?;
            return Ok(Cow::Owned(Value::Array(selected)));
        }

        let index = resolve_index(self.start_index, size);
        trace!(expr = %self, index, "selecting element");
        Ok(Cow::Borrowed(doc.array_get(index)?.unwrap_or(&NULL)))
    }

    fn set(&self, doc: &mut Value, value: Value, ctx: &EvalContext) -> Result<(), EvalError> {
        if self.is_selecting_all() {
            trace!(expr = %self, "replacing whole array");
            *doc = value;
            return Ok(());
        }

        let size = doc.array_len()?;

        if !self.is_selecting_range() {
            let index = resolve_index(self.start_index, size);
            trace!(expr = %self, index, "writing element");
            return doc.array_set(index, value);
        }

        let (start, end, step) = self.walk(size);
        debug!(expr = %self, start, end, step, mode = ?ctx.range_write, "writing range");
        match ctx.range_write {
            RangeWrite::SelfCopy => {
                for (source, index) in positions(start, end, step).enumerate() {
                    let element = doc.array_get(source as i64)?.cloned().unwrap_or_default();
                    doc.array_set(index, element)?;
                }
            }
            RangeWrite::Spread => {
                let elements = match value {
                    Value::Array(elements) => elements,
                    other => {
                        return Err(EvalError::TypeError(format!(
                            "Cannot spread {} over array range {}",
                            other.type_name(),
                            self
                        )));
                    }
                };
                let mut elements = elements.into_iter();
                for index in positions(start, end, step) {
                    doc.array_set(index, elements.next().unwrap_or_default())?;
                }
            }
        }
        Ok(())
    }

    fn render(&self, out: &mut String) {
        out.push('[');
        if self.is_selecting_all() {
            out.push('*');
        } else {
            // writing into a String cannot fail
            let _ = write!(out, "{}", self.start_index);
            if self.is_selecting_range() {
                let _ = write!(out, ":{}", self.end_index);
            }
        }
        out.push(']');
    }
}

impl fmt::Display for ArrayAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(2, 5), 2);
        assert_eq!(resolve_index(-1, 5), 4);
        assert_eq!(resolve_index(-7, 5), -2);
        assert_eq!(resolve_index(9, 5), 9);
    }

    #[test]
    fn test_positions_forward_and_backward() {
        assert_eq!(positions(1, 3, 1).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(positions(3, 1, -1).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(positions(2, 2, -1).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_positions_at_integer_extremes() {
        let walk: Vec<_> = positions(i64::MAX, i64::MIN, -1).take(2).collect();
        assert_eq!(walk, vec![i64::MAX, i64::MAX - 1]);
        let walk: Vec<_> = positions(i64::MIN, i64::MIN + 1, 1).collect();
        assert_eq!(walk, vec![i64::MIN, i64::MIN + 1]);
    }

    #[test]
    fn test_check_position() {
        assert!(check_position(0, 1).is_ok());
        assert_eq!(
            check_position(1, 1),
            Err(EvalError::IndexOutOfBounds { index: 1, size: 1 })
        );
        assert!(check_position(-1, 1).is_err());
    }

    #[test]
    fn test_walk_step_follows_resolved_order() {
        // -1 resolves to 4, which lies after 2
        assert_eq!(ArrayAccess::range(-1, 2).walk(5), (4, 2, -1));
        assert_eq!(ArrayAccess::range(2, -1).walk(5), (2, 4, 1));
    }

    #[test]
    fn test_selection_flags() {
        assert!(ArrayAccess::all().is_selecting_all());
        assert!(ArrayAccess::all().is_selecting_range());
        assert!(!ArrayAccess::index(0).is_selecting_range());
        assert!(!ArrayAccess::range(0, 4).is_selecting_all());
        assert_eq!(ArrayAccess::default(), ArrayAccess::range(0, -1));
    }
}
