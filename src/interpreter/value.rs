/// Runtime values.
///
/// Defines the `Value` enum produced by evaluation, its formatting and the
/// exact-type check used at assignment and call boundaries.
pub mod core;
/// Value type tags.
///
/// Defines `ValueType`, the closed set of runtime types, and the mapping from
/// the source language's type annotations (`num`, `flo`, `str`, `bool`, `arr`)
/// to those tags.
pub mod types;
