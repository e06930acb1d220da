use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Block, Node},
    config::Config,
    error::RuntimeError,
    interpreter::{
        evaluator::{function::core::FunctionManager, scope::ScopeManager},
        value::core::Value,
    },
    util::stack::with_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How evaluation of a statement finished.
///
/// A `return` does not unwind through errors. It surfaces as
/// [`Flow::Returning`] and every block, loop and branch passes it straight
/// up to the nearest function call, which turns it back into a plain value.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement ran to completion and produced this value.
    Completed(Value),
    /// A `return` statement is unwinding with this value.
    Returning(Value),
}

impl Flow {
    /// The carried value, whichever way evaluation finished.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Completed(value) | Self::Returning(value) => value,
        }
    }
}

/// Stores the runtime evaluation state.
///
/// Holds the scope stack, the function registry, the limits the run was
/// configured with, the current depth of nested user calls and the index of
/// the innermost call frame's first scope.
///
/// ## Usage
///
/// An `Evaluator` is created once per session and reused for every program
/// run in it, so variables and functions declared by one run stay visible to
/// the next.
///
/// # Example
/// ```
/// use sprig::{
///     config::Config,
///     interpreter::{evaluator::core::Evaluator, parser::core::parse_source, value::core::Value},
/// };
///
/// let mut evaluator = Evaluator::new(Config::default());
/// let program = parse_source("x = 4; x * 2.5;").unwrap();
///
/// assert_eq!(evaluator.run(&program).unwrap(), Value::Int(10));
/// ```
pub struct Evaluator {
    pub(crate) scopes:     ScopeManager,
    pub(crate) functions:  FunctionManager,
    pub(crate) config:     Config,
    pub(crate) call_depth: usize,
    pub(crate) frame_base: usize,
}

impl Evaluator {
    /// Creates an evaluator with the global scope in place and no functions
    /// registered.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut scopes = ScopeManager::new();
        scopes.push_scope();

        Self { scopes,
               functions: FunctionManager::new(),
               config,
               call_depth: 0,
               frame_base: 0 }
    }

    /// The variable scopes.
    #[must_use]
    pub const fn scopes(&self) -> &ScopeManager {
        &self.scopes
    }

    /// The function registry.
    #[must_use]
    pub const fn functions(&self) -> &FunctionManager {
        &self.functions
    }

    /// Mutable access to the function registry, for registering natives.
    pub const fn functions_mut(&mut self) -> &mut FunctionManager {
        &mut self.functions
    }

    /// Runs a parsed program statement by statement in the global scope.
    ///
    /// # Returns
    /// The value of the last top-level statement, or `Value::None` for an
    /// empty program.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised. A `return` outside any
    /// function is reported as `ReturnOutsideFunction`.
    pub fn run(&mut self, program: &[Node]) -> EvalResult<Value> {
        debug!(statements = program.len(), "running program");

        let mut last = Value::None;
        for statement in program {
            match self.evaluate(statement)? {
                Flow::Completed(value) => last = value,
                Flow::Returning(_) => {
                    return Err(RuntimeError::ReturnOutsideFunction { line:
                                                                         statement.line_number(), });
                },
            }
        }

        Ok(last)
    }

    /// Evaluates a single node.
    ///
    /// Expressions always complete. Statements that contain blocks complete
    /// unless a `return` inside them fired.
    ///
    /// Deep recursion continues on a freshly allocated stack segment instead
    /// of overflowing the host thread.
    ///
    /// # Errors
    /// Any `RuntimeError` raised while evaluating the node or its children.
    pub fn evaluate(&mut self, node: &Node) -> EvalResult<Flow> {
        with_stack(|| self.evaluate_inner(node))
    }

    fn evaluate_inner(&mut self, node: &Node) -> EvalResult<Flow> {
        match node {
            Node::FunctionDecl(def) => {
                self.functions.register_function(Rc::clone(def));
                Ok(Flow::Completed(Value::None))
            },
            Node::FunctionCall { name,
                                 arguments,
                                 line, } => Ok(Flow::Completed(self.call(name, arguments, *line)?)),
            Node::Return { value, .. } => Ok(Flow::Returning(self.eval_value(value)?)),
            Node::If { condition, body, .. } => {
                if self.eval_value(condition)?.is_truthy() {
                    self.eval_block(body)
                } else {
                    Ok(Flow::Completed(Value::None))
                }
            },
            Node::For { header, body, line } => self.eval_for(header, body, *line),
            Node::Identifier { name, line } => {
                Ok(Flow::Completed(self.scopes.get(name, *line)?.clone()))
            },
            Node::IntLiteral { value, .. } => Ok(Flow::Completed(Value::Int(*value))),
            Node::FloatLiteral { value, .. } => Ok(Flow::Completed(Value::Float(*value))),
            Node::StringLiteral { value, .. } => Ok(Flow::Completed(Value::String(value.clone()))),
            Node::BoolLiteral { value, .. } => Ok(Flow::Completed(Value::Bool(*value))),
            Node::ArrayLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval_value(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Flow::Completed(Value::from(values)))
            },
            Node::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval_value(left)?;
                let right = self.eval_value(right)?;
                Ok(Flow::Completed(Self::eval_binary(*op, &left, &right, *line)?))
            },
            Node::Assignment { target,
                               value,
                               line, } => {
                let value = self.eval_value(value)?;
                self.assign(target, value.clone(), *line)?;
                Ok(Flow::Completed(value))
            },
        }
    }

    /// Evaluates a node in expression position and returns its value.
    ///
    /// # Errors
    /// Any `RuntimeError` raised while evaluating the node.
    pub fn eval_value(&mut self, node: &Node) -> EvalResult<Value> {
        Ok(self.evaluate(node)?.into_value())
    }

    /// Binds `value` to `name`.
    ///
    /// A name already bound anywhere in the current call frame, including
    /// the enclosing blocks and the function's parameters, is overwritten,
    /// but only with a value of the same type. Any other name gets a fresh
    /// binding in the innermost scope, so a callee never overwrites its
    /// caller's variables.
    fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if let Some(existing) = self.scopes.find_from(self.frame_base, name) {
            value.check_type(existing.value_type(), line)?;
            self.scopes.set(name, value, line)
        } else {
            self.scopes.define(name, value, line)
        }
    }

    /// Evaluates a block in a fresh scope.
    ///
    /// # Returns
    /// The value of the last statement, `Value::None` for an empty block, or
    /// the `return` signal of the statement that raised it.
    pub(crate) fn eval_block(&mut self, block: &Block) -> EvalResult<Flow> {
        self.scoped(block.line, |evaluator| evaluator.eval_statements(&block.statements))
    }

    /// Evaluates statements in order in the current scope, stopping at the
    /// first `return`.
    pub(crate) fn eval_statements(&mut self, statements: &[Node]) -> EvalResult<Flow> {
        let mut last = Value::None;
        for statement in statements {
            match self.evaluate(statement)? {
                Flow::Completed(value) => last = value,
                returning @ Flow::Returning(_) => return Ok(returning),
            }
        }

        Ok(Flow::Completed(last))
    }

    /// Runs `f` inside a freshly pushed scope.
    ///
    /// The scope is popped again whether `f` succeeds or fails.
    pub(crate) fn scoped<T>(&mut self,
                            line: usize,
                            f: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        self.scopes.push_scope();
        let result = f(self);
        self.scopes.pop_scope(line)?;
        result
    }
}
