/// Parser state and entry points.
///
/// Holds the `Parser` (current token plus the lexer), token matching helpers
/// and `parse_source`, the one-call way to turn text into a program.
pub mod core;

/// Statement parsing.
///
/// Function declarations, `if`, `for` and `return` statements, blocks and
/// expression statements.
pub mod statement;

/// Expression parsing.
///
/// Assignments, left-to-right binary chains, calls, groupings, array
/// literals and scalar literals.
pub mod expression;
