use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{EvalResult, Evaluator},
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a logical operator on two booleans.
    ///
    /// Both operands are already evaluated, so `&&` and `||` do not
    /// short-circuit.
    ///
    /// # Errors
    /// `UnsupportedOperator` for anything but `&&`, `||`, `==` and `!=`.
    pub(crate) fn eval_logic(op: BinaryOperator,
                             left: bool,
                             right: bool,
                             line: usize)
                             -> EvalResult<Value> {
        match op {
            BinaryOperator::And => Ok(Value::Bool(left && right)),
            BinaryOperator::Or => Ok(Value::Bool(left || right)),
            BinaryOperator::Equal => Ok(Value::Bool(left == right)),
            BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
            _ => Err(unsupported(op, &Value::Bool(left), &Value::Bool(right), line)),
        }
    }
}
