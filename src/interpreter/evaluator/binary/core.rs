use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a binary operation between two values.
    ///
    /// Routes by operand types: two numbers go to `eval_numeric`, two
    /// booleans to `eval_logic` and two strings to `eval_text`. Any other
    /// pairing, and any operator the chosen family does not implement, is an
    /// `UnsupportedOperator` error.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use sprig::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let sum = Evaluator::eval_binary(BinaryOperator::Add, &Value::Int(3), &Value::Float(0.5), 1);
    /// assert_eq!(sum.unwrap(), Value::Float(3.5));
    ///
    /// let joined = Evaluator::eval_binary(BinaryOperator::Add, &"a".into(), &"b".into(), 1);
    /// assert_eq!(joined.unwrap(), Value::from("ab"));
    ///
    /// assert!(Evaluator::eval_binary(BinaryOperator::Add, &"a".into(), &Value::Int(1), 1).is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Self::eval_logic(op, *a, *b, line),
            (Value::String(a), Value::String(b)) => Self::eval_text(op, a, b, line),
            _ if left.is_number() && right.is_number() => Self::eval_numeric(op, left, right, line),
            _ => Err(unsupported(op, left, right, line)),
        }
    }
}

/// Builds the error for `op` having no meaning on these operands.
pub(crate) fn unsupported(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> RuntimeError {
    RuntimeError::UnsupportedOperator { op: op.symbol().to_string(),
                                        left: left.value_type(),
                                        right: right.value_type(),
                                        line }
}
