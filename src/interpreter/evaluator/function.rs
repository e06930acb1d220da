/// The `cout` output function.
///
/// Writes the display form of each argument followed by a newline to a
/// shared output sink.
pub mod builtin;

/// The function registry and the call procedure.
pub mod core;
