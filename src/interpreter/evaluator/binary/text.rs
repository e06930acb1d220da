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
    /// Evaluates an operator on two strings.
    ///
    /// `+` concatenates; `==` and `!=` compare the text.
    ///
    /// # Errors
    /// `UnsupportedOperator` for every other operator.
    pub(crate) fn eval_text(op: BinaryOperator,
                            left: &str,
                            right: &str,
                            line: usize)
                            -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => Ok(Value::String(format!("{left}{right}"))),
            BinaryOperator::Equal => Ok(Value::Bool(left == right)),
            BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
            _ => Err(unsupported(op, &Value::from(left), &Value::from(right), line)),
        }
    }
}
