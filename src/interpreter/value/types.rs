use std::fmt;

/// The type tag of a runtime [`Value`](super::core::Value).
///
/// The set is closed: every value carries exactly one of these tags, and
/// declared parameter and return types are expressed with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// The absence of a value.
    None,
    /// A 64 bit signed integer, annotated `num`.
    Int,
    /// A double precision float, annotated `flo`.
    Float,
    /// A boolean, annotated `bool`.
    Bool,
    /// A string, annotated `str`.
    String,
    /// An array of values, annotated `arr`.
    Array,
}

impl ValueType {
    /// Maps a type annotation to its tag.
    ///
    /// Returns `None` for anything outside the fixed annotation table.
    ///
    /// # Example
    /// ```
    /// use sprig::interpreter::value::types::ValueType;
    ///
    /// assert_eq!(ValueType::from_annotation("num"), Some(ValueType::Int));
    /// assert_eq!(ValueType::from_annotation("flo"), Some(ValueType::Float));
    /// assert_eq!(ValueType::from_annotation("int"), None);
    /// ```
    #[must_use]
    pub fn from_annotation(annotation: &str) -> Option<Self> {
        match annotation {
            "num" => Some(Self::Int),
            "flo" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "str" => Some(Self::String),
            "arr" => Some(Self::Array),
            _ => None,
        }
    }

    /// The annotation keyword for this tag; `none` has no annotation of its
    /// own and is only used in messages.
    #[must_use]
    pub const fn annotation(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Int => "num",
            Self::Float => "flo",
            Self::Bool => "bool",
            Self::String => "str",
            Self::Array => "arr",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.annotation())
    }
}
