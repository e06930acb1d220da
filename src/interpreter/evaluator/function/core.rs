use std::{collections::HashMap, fmt, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{FunctionDef, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        value::core::Value,
    },
};

/// Type alias for native function handlers.
///
/// A native receives the evaluated argument values and the line number of
/// the call. It accepts any number of arguments and validates them itself.
pub type NativeFn = Rc<dyn Fn(&[Value], usize) -> EvalResult<Value>>;

/// What a function name resolved to.
#[derive(Clone)]
pub enum Callable {
    /// A function implemented by the host.
    Native(NativeFn),
    /// A function declared in the program.
    User(Rc<FunctionDef>),
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => f.write_str("Native(..)"),
            Self::User(def) => f.debug_tuple("User").field(&def.name).finish(),
        }
    }
}

/// The function registry.
///
/// User-declared and native functions live in separate tables. When a name
/// is in both, the native wins. Registering a user function under a name
/// that is already declared replaces the earlier declaration.
///
/// # Example
/// ```
/// use sprig::interpreter::{evaluator::function::core::FunctionManager, value::core::Value};
///
/// let mut functions = FunctionManager::new();
/// functions.register_native("answer", |_, _| Ok(Value::Int(42)));
///
/// assert!(functions.is_defined("answer"));
/// assert!(functions.resolve("missing", 1).is_err());
/// ```
#[derive(Default)]
pub struct FunctionManager {
    user:   HashMap<String, Rc<FunctionDef>>,
    native: HashMap<String, NativeFn>,
}

impl FunctionManager {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declared function under its own name.
    pub fn register_function(&mut self, def: Rc<FunctionDef>) {
        debug!(name = %def.name, params = def.params.len(), "registered function");
        self.user.insert(def.name.clone(), def);
    }

    /// Registers a native function under `name`.
    pub fn register_native<F>(&mut self, name: impl Into<String>, native: F)
        where F: Fn(&[Value], usize) -> EvalResult<Value> + 'static
    {
        let name = name.into();
        debug!(%name, "registered native function");
        self.native.insert(name, Rc::new(native));
    }

    /// Looks a name up, natives first.
    ///
    /// # Errors
    /// `UnknownFunction` if neither table has the name.
    pub fn resolve(&self, name: &str, line: usize) -> EvalResult<Callable> {
        if let Some(native) = self.native.get(name) {
            return Ok(Callable::Native(Rc::clone(native)));
        }

        self.user
            .get(name)
            .map(|def| Callable::User(Rc::clone(def)))
            .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                           line })
    }

    /// Returns `true` if `name` is a native or a declared function.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.native.contains_key(name) || self.user.contains_key(name)
    }
}

impl Evaluator {
    /// Evaluates a function call.
    ///
    /// Natives get their arguments evaluated and are invoked directly. User
    /// functions go through [`Evaluator::call_user_function`].
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// `UnknownFunction` for an unregistered name, or any error raised by the
    /// arguments or the callee.
    pub fn call(&mut self, name: &str, arguments: &[Node], line: usize) -> EvalResult<Value> {
        match self.functions.resolve(name, line)? {
            Callable::Native(native) => {
                let args = self.eval_arguments(arguments)?;
                trace!(name, args = args.len(), "calling native function");
                native(&args, line)
            },
            Callable::User(def) => self.call_user_function(&def, arguments, line),
        }
    }

    /// Calls a declared function.
    ///
    /// 1. The argument count must equal the parameter count.
    /// 2. The call must not exceed the configured nesting limit.
    /// 3. Arguments are evaluated left to right in the caller's scope.
    /// 4. One scope is pushed and each argument is type-checked against its
    ///    parameter and bound to it. The body's statements run in that same
    ///    scope, which becomes the base of the new call frame.
    /// 5. A `return` value is checked against the declared return type, if
    ///    any. Falling off the end yields the last statement's value
    ///    unchecked.
    ///
    /// The scope is popped on every path out of the call.
    fn call_user_function(&mut self,
                          def: &FunctionDef,
                          arguments: &[Node],
                          line: usize)
                          -> EvalResult<Value> {
        if def.params.len() != arguments.len() {
            return Err(RuntimeError::ArityMismatch { name: def.name.clone(),
                                                     expected: def.params.len(),
                                                     found: arguments.len(),
                                                     line });
        }

        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::RecursionLimit { name: def.name.clone(),
                                                      limit: self.config.max_call_depth,
                                                      line });
        }

        let args = self.eval_arguments(arguments)?;

        self.call_depth += 1;
        let caller_base = std::mem::replace(&mut self.frame_base, self.scopes.depth());
        trace!(name = %def.name, depth = self.call_depth, "entering function");

        let result = self.scoped(line, |evaluator| {
                             for (param, arg) in def.params.iter().zip(args) {
                                 arg.check_type(param.ty, line)?;
                                 evaluator.scopes.define(&param.name, arg, line)?;
                             }
                             evaluator.eval_statements(&def.body.statements)
                         });

        self.frame_base = caller_base;
        self.call_depth -= 1;

        match result? {
            Flow::Returning(value) => {
                if let Some(expected) = def.return_type {
                    value.check_type(expected, line)?;
                }
                Ok(value)
            },
            Flow::Completed(value) => Ok(value),
        }
    }

    fn eval_arguments(&mut self, arguments: &[Node]) -> EvalResult<Vec<Value>> {
        arguments.iter()
                 .map(|argument| self.eval_value(argument))
                 .collect()
    }
}
