/// Core evaluation logic.
///
/// Contains the `Evaluator`, the control-flow result threaded through
/// statement evaluation, node dispatch and block scoping.
pub mod core;

/// The lexical-scope stack.
///
/// Implements nested scopes as a stack of name-to-value maps with
/// define-in-current and set-nearest semantics.
pub mod scope;

/// Function registry and call dispatch.
///
/// Holds user-declared and native functions, binds typed parameters and
/// intercepts return signals at the call boundary.
pub mod function;

/// Binary operator evaluation.
///
/// Dispatches to the numeric, boolean and string operator families by
/// operand types.
pub mod binary;

/// Evaluation of `for` statements.
///
/// Supports the counting form and the condition-only form.
pub mod for_loop;
