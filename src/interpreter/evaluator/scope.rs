use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A single lexical scope: variable names and their current values.
pub type Scope = HashMap<String, Value>;

/// A stack of lexical scopes.
///
/// The first scope pushed is the global scope. Lookups walk from the
/// innermost scope outwards. Definitions always land in the innermost scope.
///
/// # Example
/// ```
/// use sprig::interpreter::{evaluator::scope::ScopeManager, value::core::Value};
///
/// let mut scopes = ScopeManager::new();
/// scopes.push_scope();
/// scopes.define("x", Value::Int(1), 1).unwrap();
///
/// scopes.push_scope();
/// scopes.set("x", Value::Int(2), 2).unwrap();
/// scopes.pop_scope(3).unwrap();
///
/// assert_eq!(scopes.get("x", 4).unwrap(), &Value::Int(2));
/// ```
#[derive(Debug, Default)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
}

impl ScopeManager {
    /// Creates an empty stack with no scopes at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an empty innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pops the innermost scope and drops its bindings.
    ///
    /// # Errors
    /// `ScopeUnderflow` if there is no scope to pop.
    pub fn pop_scope(&mut self, line: usize) -> EvalResult<()> {
        self.scopes
            .pop()
            .map(|_| ())
            .ok_or(RuntimeError::ScopeUnderflow { line })
    }

    /// Creates a binding in the innermost scope.
    ///
    /// # Errors
    /// `AlreadyDefined` if the innermost scope already binds `name`, and
    /// `ScopeUnderflow` if there is no scope.
    pub fn define(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let current = self.scopes
                          .last_mut()
                          .ok_or(RuntimeError::ScopeUnderflow { line })?;

        if current.contains_key(name) {
            return Err(RuntimeError::AlreadyDefined { name: name.to_string(),
                                                      line });
        }

        current.insert(name.to_string(), value);
        Ok(())
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// # Errors
    /// `UndefinedVariable` if no scope binds `name`.
    pub fn set(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let slot = self.scopes
                       .iter_mut()
                       .rev()
                       .find_map(|scope| scope.get_mut(name))
                       .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                        line })?;
        *slot = value;
        Ok(())
    }

    /// Reads the nearest binding of `name`.
    ///
    /// # Errors
    /// `UndefinedVariable` if no scope binds `name`, and `ScopeUnderflow` if
    /// there is no scope.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<&Value> {
        if self.scopes.is_empty() {
            return Err(RuntimeError::ScopeUnderflow { line });
        }

        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                             line })
    }

    /// Reads the nearest binding of `name` among the scopes from index
    /// `base` up to the innermost one. Scopes below `base` are not searched.
    #[must_use]
    pub fn find_from(&self, base: usize, name: &str) -> Option<&Value> {
        self.scopes
            .get(base..)?
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Returns `true` if the innermost scope binds `name`.
    #[must_use]
    pub fn has_in_current(&self, name: &str) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains_key(name))
    }

    /// The number of scopes on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_twice_in_same_scope_fails() {
        let mut scopes = ScopeManager::new();
        scopes.push_scope();
        scopes.define("x", Value::Int(1), 1).unwrap();

        assert_eq!(scopes.define("x", Value::Int(2), 2),
                   Err(RuntimeError::AlreadyDefined { name: "x".to_string(),
                                                      line: 2, }));
    }

    #[test]
    fn inner_definition_shadows_and_disappears_on_pop() {
        let mut scopes = ScopeManager::new();
        scopes.push_scope();
        scopes.define("x", Value::Int(1), 1).unwrap();

        scopes.push_scope();
        scopes.define("x", Value::from("inner"), 2).unwrap();
        assert_eq!(scopes.get("x", 3).unwrap(), &Value::from("inner"));

        scopes.pop_scope(4).unwrap();
        assert_eq!(scopes.get("x", 5).unwrap(), &Value::Int(1));
    }

    #[test]
    fn set_without_binding_fails() {
        let mut scopes = ScopeManager::new();
        scopes.push_scope();

        assert_eq!(scopes.set("y", Value::Int(1), 7),
                   Err(RuntimeError::UndefinedVariable { name: "y".to_string(),
                                                         line: 7, }));
    }

    #[test]
    fn operations_without_scope_underflow() {
        let mut scopes = ScopeManager::new();

        assert_eq!(scopes.pop_scope(1), Err(RuntimeError::ScopeUnderflow { line: 1 }));
        assert_eq!(scopes.define("x", Value::None, 2),
                   Err(RuntimeError::ScopeUnderflow { line: 2 }));
        assert_eq!(scopes.get("x", 3), Err(RuntimeError::ScopeUnderflow { line: 3 }));
    }

    #[test]
    fn find_from_skips_scopes_below_base() {
        let mut scopes = ScopeManager::new();
        scopes.push_scope();
        scopes.define("caller", Value::Int(1), 1).unwrap();
        scopes.push_scope();
        scopes.define("local", Value::Int(2), 2).unwrap();
        scopes.push_scope();

        assert_eq!(scopes.find_from(1, "local"), Some(&Value::Int(2)));
        assert_eq!(scopes.find_from(1, "caller"), None);
        assert_eq!(scopes.find_from(0, "caller"), Some(&Value::Int(1)));
        assert_eq!(scopes.find_from(5, "local"), None);
    }

    #[test]
    fn has_in_current_ignores_outer_scopes() {
        let mut scopes = ScopeManager::new();
        scopes.push_scope();
        scopes.define("x", Value::Bool(true), 1).unwrap();
        scopes.push_scope();

        assert!(!scopes.has_in_current("x"));
        assert_eq!(scopes.depth(), 2);
    }
}
