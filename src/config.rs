/// Default ceiling on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Interpreter settings.
///
/// # Example
/// ```
/// use sprig::config::{Config, DEFAULT_MAX_CALL_DEPTH};
///
/// assert_eq!(Config::default().max_call_depth, DEFAULT_MAX_CALL_DEPTH);
/// assert_eq!(Config::default().with_max_call_depth(8).max_call_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How many user function calls may be active at once. The call that
    /// would exceed it fails with `RecursionLimit`.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH }
    }
}

impl Config {
    /// Replaces the call-depth ceiling.
    #[must_use]
    pub const fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }
}
