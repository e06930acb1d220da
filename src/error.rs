/// Parsing errors.
///
/// Defines all error types that can occur while turning tokens into a syntax
/// tree: unexpected tokens, trailing commas in parameter lists, unterminated
/// blocks and literals that cannot be represented.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// unknown names, type mismatches, arity mismatches and unsupported operator
/// and operand combinations.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Any failure that aborts a run.
///
/// Produced by [`crate::run`] and [`crate::interpreter::session::Session::run`].
#[derive(Debug, Error)]
pub enum Error {
    /// The source text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the runtime error, if this is one.
    #[must_use]
    pub const fn as_runtime(&self) -> Option<&RuntimeError> {
        match self {
            Self::Runtime(e) => Some(e),
            Self::Parse(_) => None,
        }
    }

    /// Returns the parse error, if this is one.
    #[must_use]
    pub const fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(_) => None,
        }
    }
}
