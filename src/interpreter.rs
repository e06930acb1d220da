/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the syntax tree statement by statement, keeping
/// variables in a stack of lexical scopes and functions in a registry.
///
/// # Responsibilities
/// - Evaluates every node kind, including operators and loops.
/// - Binds typed parameters and checks declared return types on calls.
/// - Reports runtime errors such as undefined names or type mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a lazy stream of tokens
/// for literals, names, keywords, operators and punctuation, each with the
/// line and column it starts at. It never fails: unrecognised characters
/// become `Unknown` tokens for the parser to reject.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one token of lookahead. Statements are
/// recognised by their leading keyword, and binary operators fold strictly
/// left to right.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Node`]s.
/// - Validates the grammar, reporting errors with line and column.
pub mod parser;
/// A long-lived interpreter combining parser and evaluator.
///
/// Sessions own the output sink used by `cout` and keep their variables and
/// functions across runs.
pub mod session;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the dynamically typed [`value::core::Value`] and the type tags
/// used by parameter and return annotations.
pub mod value;
