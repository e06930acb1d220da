use thiserror::Error;

use crate::interpreter::value::types::ValueType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Read or wrote a variable that no scope holds.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Defined a variable that already exists in the current scope.
    #[error("Error on line {line}: Variable '{name}' is already defined in the current scope.")]
    AlreadyDefined {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Popped, defined or read with no scope on the stack.
    #[error("Error on line {line}: No active scope.")]
    ScopeUnderflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value did not have the exact type that was required.
    #[error("Error on line {line}: Type mismatch. Expected {expected}, found {found}.")]
    TypeMismatch {
        /// The required type.
        expected: ValueType,
        /// The type of the value that was supplied.
        found:    ValueType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a function with the wrong number of arguments.
    #[error("Error on line {line}: Function '{name}' expects {expected} argument(s), found {found}.")]
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called a name that is neither a native nor a declared function.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operator is not implemented for the operand types.
    #[error("Error on line {line}: Unsupported operator '{op}' for {left} and {right}.")]
    UnsupportedOperator {
        /// The operator as written.
        op:    String,
        /// Type of the left operand.
        left:  ValueType,
        /// Type of the right operand.
        right: ValueType,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A counting loop whose header is not an assignment to a variable.
    #[error("Error on line {line}: Malformed for loop: {details}.")]
    MalformedLoop {
        /// Why the loop is malformed.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Loop variable or limit was not numeric.
    #[error("Error on line {line}: Invalid loop bounds: {details}.")]
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A `return` statement outside of any function body.
    #[error("Error on line {line}: 'return' outside of a function.")]
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Nested user function calls exceeded the configured ceiling.
    #[error("Error on line {line}: Call to '{name}' exceeds the maximum call depth of {limit}.")]
    RecursionLimit {
        /// The function being entered.
        name:  String,
        /// The configured ceiling.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Integer arithmetic overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing program output failed.
    #[error("Error on line {line}: Failed to write output: {details}.")]
    Output {
        /// The underlying I/O error message.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Gets the line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedVariable { line, .. }
            | Self::AlreadyDefined { line, .. }
            | Self::ScopeUnderflow { line }
            | Self::TypeMismatch { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::UnsupportedOperator { line, .. }
            | Self::MalformedLoop { line, .. }
            | Self::InvalidLoopBounds { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::RecursionLimit { line, .. }
            | Self::Overflow { line }
            | Self::Output { line, .. } => *line,
        }
    }
}
