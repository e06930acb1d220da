/// Numeric conversion helpers.
///
/// Conversions between `i64` and `f64` used by mixed-type arithmetic: a
/// double only demotes back to an integer when it is integral and in range.
pub mod num;
/// Stack growth for deep recursion.
///
/// Lets the recursive parser and evaluator go deeper than the host thread's
/// stack allows.
pub mod stack;
