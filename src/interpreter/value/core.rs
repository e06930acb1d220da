use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::types::ValueType},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models every value that can be stored in a variable, passed to
/// or returned from a function, or produced by an expression. Exactly one
/// payload is meaningful per variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value. Produced by statements such as function
    /// declarations, loops, an `if` whose condition is false, and `cout`.
    #[default]
    None,
    /// A 64 bit signed integer.
    Int(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A string of text.
    String(String),
    /// An ordered, heterogeneous sequence of values.
    Array(Rc<Vec<Self>>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl Value {
    /// Returns the type tag of this value.
    ///
    /// # Example
    /// ```
    /// use sprig::interpreter::value::{core::Value, types::ValueType};
    ///
    /// assert_eq!(Value::Int(3).value_type(), ValueType::Int);
    /// assert_eq!(Value::from("hi").value_type(), ValueType::String);
    /// ```
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::None => ValueType::None,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Bool(_) => ValueType::Bool,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
        }
    }

    /// Returns `true` for `Int` and `Float`.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Fails unless this value's tag is exactly `expected`.
    ///
    /// There is no widening: an `Int` does not satisfy `Float` and vice versa.
    /// Used when re-assigning an existing variable and when binding
    /// parameters and return values.
    ///
    /// # Parameters
    /// - `expected`: The required type.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use sprig::interpreter::value::{core::Value, types::ValueType};
    ///
    /// assert!(Value::Int(1).check_type(ValueType::Int, 1).is_ok());
    /// assert!(Value::Int(1).check_type(ValueType::Float, 1).is_err());
    /// ```
    pub fn check_type(&self, expected: ValueType, line: usize) -> EvalResult<()> {
        let found = self.value_type();
        if found == expected {
            Ok(())
        } else {
            Err(RuntimeError::TypeMismatch { expected,
                                             found,
                                             line })
        }
    }

    /// Converts a numeric value to `f64` for double-precision arithmetic.
    ///
    /// Integers beyond 2^53 in magnitude round to the nearest double.
    /// Non-numeric values yield `None`.
    ///
    /// # Example
    /// ```
    /// use sprig::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Int(3).as_f64(), Some(3.0));
    /// assert_eq!(Value::from("3").as_f64(), None);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Tests the value as a condition.
    ///
    /// Booleans are themselves, numbers are true when non-zero, strings and
    /// arrays when non-empty and `None` is false.
    ///
    /// # Example
    /// ```
    /// use sprig::interpreter::value::core::Value;
    ///
    /// assert!(Value::Int(2).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(!Value::None.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Bool(b) => *b,
            Self::String(s) => !s.is_empty(),
            Self::Array(a) => !a.is_empty(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "null"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(r) => write!(f, "{r:.6}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
        }
    }
}
