use std::collections::HashMap;

use crate::evaluator::EvalError;

/// The canonical null value.
///
/// Expressions that find nothing at the position they address hand out a
/// reference to this static instead of allocating a fresh `Value::Null`.
pub static NULL: Value = Value::Null;

/// A JSON document value that expressions read from and write into.
///
/// This type represents all valid JSON types with a distinction between
/// integers and floats (unlike standard JSON which only has "number").
///
/// Arrays are the only variant the expression nodes in this crate inspect;
/// they go through the `array_*` adapter methods so that indexing rules live
/// in one place.
///
/// # Examples
///
/// ```
/// use jexpr::Value;
/// use std::collections::HashMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = HashMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null
    #[default]
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys and value values
    Object(HashMap<String, Value>),
}

impl Value {
    /// Returns a human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// True for every variant that is neither an array nor an object.
    pub fn is_scalar(&self) -> bool {
        !self.is_array() && !self.is_object()
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Number of elements of an array value.
    ///
    /// Fails with a type error for any other variant.
    pub fn array_len(&self) -> Result<usize, EvalError> {
        self.as_array()
            .map(Vec::len)
            .ok_or_else(|| not_an_array(self))
    }

    /// Element at `index` of an array value.
    ///
    /// Returns `Ok(None)` when the index is negative or past the end; only a
    /// non-array receiver is an error.
    pub fn array_get(&self, index: i64) -> Result<Option<&Value>, EvalError> {
        let arr = self.as_array().ok_or_else(|| not_an_array(self))?;
        Ok(usize::try_from(index).ok().and_then(|i| arr.get(i)))
    }

    /// Replaces the element at `index` of an array value.
    ///
    /// Only existing positions can be written; anything else is reported as
    /// [`EvalError::IndexOutOfBounds`] and the array is left untouched.
    pub fn array_set(&mut self, index: i64, value: Value) -> Result<(), EvalError> {
        let type_name = self.type_name();
        let arr = self.as_array_mut().ok_or_else(|| {
            EvalError::TypeError(format!("Cannot index {} as an array", type_name))
        })?;
        let size = arr.len();
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| arr.get_mut(i))
            .ok_or(EvalError::IndexOutOfBounds { index, size })?;
        *slot = value;
        Ok(())
    }
}

fn not_an_array(value: &Value) -> EvalError {
    EvalError::TypeError(format!("Cannot index {} as an array", value.type_name()))
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Value {
        Value::Array(vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn test_array_get_out_of_range_is_absent() {
        let arr = letters();
        assert_eq!(arr.array_get(3).unwrap(), None);
        assert_eq!(arr.array_get(-1).unwrap(), None);
        assert_eq!(arr.array_get(1).unwrap(), Some(&Value::from("b")));
    }

    #[test]
    fn test_array_set_rejects_missing_position() {
        let mut arr = letters();
        let err = arr.array_set(3, Value::Null).unwrap_err();
        assert!(matches!(err, EvalError::IndexOutOfBounds { index: 3, size: 3 }));
        assert_eq!(arr, letters());
    }

    #[test]
    fn test_array_ops_on_non_array() {
        let mut obj = Value::Object(HashMap::new());
        assert!(matches!(obj.array_len(), Err(EvalError::TypeError(_))));
        assert!(matches!(obj.array_get(0), Err(EvalError::TypeError(_))));
        assert!(matches!(
            obj.array_set(0, Value::Null),
            Err(EvalError::TypeError(_))
        ));
    }

    #[test]
    fn test_null_is_default() {
        assert_eq!(Value::default(), NULL);
        assert!(NULL.is_null());
        assert!(Value::Integer(1).is_scalar());
    }
}
