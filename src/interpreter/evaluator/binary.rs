/// Operand-type dispatch for binary operators.
pub mod core;

/// Arithmetic and comparisons on `Int` and `Float` operands.
pub mod numeric;

/// `&&`, `||` and equality on `Bool` operands.
pub mod logic;

/// Concatenation and equality on `String` operands.
pub mod text;
