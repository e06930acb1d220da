/// Remaining stack below which work continues on a freshly allocated
/// segment.
pub const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated for deep recursion.
pub const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Runs `f`, first moving to a new stack segment if less than
/// [`STACK_RED_ZONE`] bytes remain on the current one.
///
/// The parser and the evaluator recurse once per nesting level of the
/// program, so both enter every level through here.
///
/// ## Example
/// ```
/// use sprig::util::stack::with_stack;
///
/// fn depth(n: u32) -> u32 {
///     with_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, f)
}
