use crate::{
    ast::{Block, LoopHeader, Node},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a `for` statement.
    ///
    /// Two forms are supported:
    ///
    /// 1. **Counting form:** `for (i = start; limit) body`. The assignment
    ///    runs once. Before every iteration `limit` is re-evaluated and the
    ///    loop stops as soon as `i >= limit`. After the body, `i` is bumped
    ///    by one based on the value it had before the body ran, so writes to
    ///    the variable inside the body are discarded.
    ///
    /// 2. **Condition form:** `for (condition) body`. The body repeats while
    ///    the condition is truthy.
    ///
    /// Every iteration runs the body in a fresh scope. A `return` inside the
    /// body ends the loop and propagates.
    ///
    /// # Returns
    /// `Value::None`, unless the body returned.
    ///
    /// # Example
    /// ```
    /// use sprig::{
    ///     config::Config,
    ///     interpreter::{evaluator::core::Evaluator, parser::core::parse_source, value::core::Value},
    /// };
    ///
    /// let mut evaluator = Evaluator::new(Config::default());
    /// let program = parse_source("s = 0; for (i = 0; 4) (s = s + i;) s;").unwrap();
    ///
    /// assert_eq!(evaluator.run(&program).unwrap(), Value::Int(6));
    /// ```
    pub(crate) fn eval_for(&mut self,
                           header: &LoopHeader,
                           body: &Block,
                           line: usize)
                           -> EvalResult<Flow> {
        match header {
            LoopHeader::Counting { init, limit } => {
                self.eval_counting_loop(init, limit, body, line)
            },
            LoopHeader::Condition(condition) => self.eval_condition_loop(condition, body),
        }
    }

    fn eval_counting_loop(&mut self,
                          init: &Node,
                          limit: &Node,
                          body: &Block,
                          line: usize)
                          -> EvalResult<Flow> {
        let Node::Assignment { target, .. } = init else {
            return Err(RuntimeError::MalformedLoop { details: "the first part of a counting \
                                                               loop header must assign the \
                                                               loop variable"
                                                                             .to_string(),
                                                     line });
        };

        self.evaluate(init)?;

        loop {
            let current = self.scopes.get(target, line)?.clone();
            let bound = self.eval_value(limit)?;

            if limit_reached(&current, &bound, target, line)? {
                break;
            }

            if let returning @ Flow::Returning(_) = self.eval_block(body)? {
                return Ok(returning);
            }

            let next = match current {
                Value::Int(n) => Value::Int(n.checked_add(1)
                                             .ok_or(RuntimeError::Overflow { line })?),
                Value::Float(f) => Value::Float(f + 1.0),
                other => other,
            };
            self.scopes.set(target, next, line)?;
        }

        Ok(Flow::Completed(Value::None))
    }

    fn eval_condition_loop(&mut self, condition: &Node, body: &Block) -> EvalResult<Flow> {
        while self.eval_value(condition)?.is_truthy() {
            if let returning @ Flow::Returning(_) = self.eval_block(body)? {
                return Ok(returning);
            }
        }

        Ok(Flow::Completed(Value::None))
    }
}

/// Whether a counting loop at `current` has reached `bound`.
///
/// Two integers compare exactly; any other numeric pair compares as `f64`.
fn limit_reached(current: &Value, bound: &Value, name: &str, line: usize) -> EvalResult<bool> {
    if let (Value::Int(a), Value::Int(b)) = (current, bound) {
        return Ok(a >= b);
    }

    match (current.as_f64(), bound.as_f64()) {
        (Some(a), Some(b)) => Ok(a >= b),
        _ => Err(RuntimeError::InvalidLoopBounds { details: format!("loop variable '{name}' is \
                                                                     {} and the limit is {}, \
                                                                     both must be numbers",
                                                                    current.value_type(),
                                                                    bound.value_type()),
                                                   line }),
    }
}
