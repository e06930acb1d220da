//! # sprig
//!
//! sprig is an interpreter for a small imperative scripting language written
//! in Rust. Programs declare typed functions, assign dynamically typed
//! variables, branch with `if`, loop with `for` and print with `cout`.
//!
//! ```
//! use sprig::{config::Config, interpreter::value::core::Value};
//!
//! let source = "
//!     fn fact(n: num) num (
//!         if (n <= 1) ( return 1; )
//!         return n * fact(n - 1);
//!     )
//!     fact(5);
//! ";
//!
//! assert_eq!(sprig::run(source, &Config::default()).unwrap(), Value::Int(120));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{config::Config, error::Error, interpreter::value::core::Value};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of a program as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression nodes for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Renders a program as an indented tree for inspection.
pub mod ast;
/// Interpreter settings.
///
/// Holds the limits a run is configured with. The command line fills it in;
/// library users build it directly.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating code. Every error carries the source line it refers to, and
/// parse errors also carry the column.
///
/// # Responsibilities
/// - Defines error enums for every failure mode (parser, evaluator).
/// - Formats messages as `Error on line L: ...`.
/// - Combines both phases into a single [`error::Error`].
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations to provide a complete runtime for source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and value
///   types.
/// - Provides the [`Session`] entry point.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
pub mod util;

pub use interpreter::session::Session;

/// Parses and runs a whole program, printing `cout` output to standard
/// output.
///
/// # Returns
/// The value of the last top-level statement, or `Value::None` for an empty
/// program.
///
/// # Errors
/// Returns an error if parsing fails, in which case nothing runs, or if any
/// runtime error occurs.
///
/// # Examples
/// ```
/// use sprig::{config::Config, run};
///
/// // Simple expression: the result will be calculated and no error should occur.
/// assert!(run("result = 2 + 2;", &Config::default()).is_ok());
///
/// // Example with an intentional error (unknown variable).
/// assert!(run("y = x + 1;", &Config::default()).is_err());
/// ```
pub fn run(source: &str, config: &Config) -> Result<Value, Error> {
    Session::new(*config).run(source)
}
