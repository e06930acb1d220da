use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while parsing.
pub enum ParseError {
    /// Found a token the grammar does not allow at this point.
    #[error("Error on line {line}, column {column}: Unexpected token {found}, expected {expected}.")]
    UnexpectedToken {
        /// The offending token, rendered as `Kind('text')`.
        found:    String,
        /// What the parser was looking for.
        expected: String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// A parameter list ended with `,` before the closing parenthesis.
    #[error("Error on line {line}, column {column}: Unexpected trailing comma in function parameters.")]
    TrailingComma {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Reached the end of input inside a block or argument list.
    #[error("Error on line {line}, column {column}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// An integer literal does not fit in a 64 bit signed integer.
    #[error("Error on line {line}, column {column}: Literal {literal} is too large.")]
    LiteralTooLarge {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// A type annotation outside of `num`, `flo`, `str`, `bool` and `arr`.
    #[error("Error on line {line}, column {column}: Unknown type '{name}'.")]
    UnknownType {
        /// The annotation as written.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
}

impl ParseError {
    /// Gets the line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::TrailingComma { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::LiteralTooLarge { line, .. }
            | Self::UnknownType { line, .. } => *line,
        }
    }
}
