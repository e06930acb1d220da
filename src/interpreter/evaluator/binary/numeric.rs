use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{EvalResult, Evaluator},
        },
        value::core::Value,
    },
    util::num::integral_f64_to_i64,
};

impl Evaluator {
    /// Evaluates an arithmetic or comparison operator on two numbers.
    ///
    /// Arithmetic is computed in double precision. The results of `+`, `-`
    /// and `*` become `Int` again whenever they are integral and fit in an
    /// `i64`, so `2 * 1.5` is `Int(3)`. `/` always produces a `Float` and
    /// follows IEEE rules for a zero divisor. Two `Int`s compare exactly;
    /// any other pair compares as doubles.
    ///
    /// # Errors
    /// `UnsupportedOperator` for `&&`, `||`, `=` and `!`.
    #[allow(clippy::float_cmp)]
    pub(crate) fn eval_numeric(op: BinaryOperator,
                               left: &Value,
                               right: &Value,
                               line: usize)
                               -> EvalResult<Value> {
        use BinaryOperator::{
            Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Sub,
        };

        if let (Value::Int(l), Value::Int(r)) = (left, right)
           && let Some(result) = compare_ints(op, *l, *r)
        {
            return Ok(Value::Bool(result));
        }

        let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) else {
            return Err(unsupported(op, left, right, line));
        };

        Ok(match op {
            Add => demote(l + r),
            Sub => demote(l - r),
            Mul => demote(l * r),
            Div => Value::Float(l / r),
            Equal => Value::Bool(l == r),
            NotEqual => Value::Bool(l != r),
            Less => Value::Bool(l < r),
            LessEqual => Value::Bool(l <= r),
            Greater => Value::Bool(l > r),
            GreaterEqual => Value::Bool(l >= r),
            _ => return Err(unsupported(op, left, right, line)),
        })
    }
}

/// Applies a comparison operator to two integers, or `None` if `op` is not
/// a comparison.
const fn compare_ints(op: BinaryOperator, l: i64, r: i64) -> Option<bool> {
    Some(match op {
        BinaryOperator::Equal => l == r,
        BinaryOperator::NotEqual => l != r,
        BinaryOperator::Less => l < r,
        BinaryOperator::LessEqual => l <= r,
        BinaryOperator::Greater => l > r,
        BinaryOperator::GreaterEqual => l >= r,
        _ => return None,
    })
}

/// Turns an integral result back into an `Int`.
fn demote(result: f64) -> Value {
    integral_f64_to_i64(result).map_or(Value::Float(result), Value::Int)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    fn numeric(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Evaluator::eval_numeric(op, &left, &right, 1)
    }

    #[test]
    fn integral_results_demote_to_int() {
        assert_eq!(numeric(BinaryOperator::Mul, Value::Int(2), Value::Float(1.5)),
                   Ok(Value::Int(3)));
        assert_eq!(numeric(BinaryOperator::Add, Value::Float(0.5), Value::Float(0.25)),
                   Ok(Value::Float(0.75)));
    }

    #[test]
    fn division_is_always_float() {
        assert_eq!(numeric(BinaryOperator::Div, Value::Int(10), Value::Int(4)),
                   Ok(Value::Float(2.5)));
        assert_eq!(numeric(BinaryOperator::Div, Value::Int(4), Value::Int(2)),
                   Ok(Value::Float(2.0)));
        assert_eq!(numeric(BinaryOperator::Div, Value::Int(1), Value::Int(0)),
                   Ok(Value::Float(f64::INFINITY)));
    }

    #[test]
    fn comparisons_mix_int_and_float() {
        assert_eq!(numeric(BinaryOperator::Less, Value::Int(1), Value::Float(1.5)),
                   Ok(Value::Bool(true)));
        assert_eq!(numeric(BinaryOperator::Equal, Value::Int(2), Value::Float(2.0)),
                   Ok(Value::Bool(true)));
    }

    #[test]
    fn logical_operator_on_numbers_is_unsupported() {
        assert!(matches!(numeric(BinaryOperator::And, Value::Int(1), Value::Int(1)),
                         Err(RuntimeError::UnsupportedOperator { .. })));
    }

    #[test]
    fn large_ints_compare_exactly() {
        let big = 9_007_199_254_740_993;

        assert_eq!(numeric(BinaryOperator::Equal, Value::Int(big), Value::Int(big)),
                   Ok(Value::Bool(true)));
        assert_eq!(numeric(BinaryOperator::Less, Value::Int(big - 1), Value::Int(big)),
                   Ok(Value::Bool(true)));
        assert_eq!(numeric(BinaryOperator::GreaterEqual, Value::Int(i64::MIN), Value::Int(i64::MAX)),
                   Ok(Value::Bool(false)));
    }

    #[test]
    fn large_int_arithmetic_goes_through_doubles() {
        assert_eq!(numeric(BinaryOperator::Add, Value::Int(9_007_199_254_740_993), Value::Int(0)),
                   Ok(Value::Int(9_007_199_254_740_992)));
        assert_eq!(numeric(BinaryOperator::Add, Value::Int(i64::MAX), Value::Int(1)),
                   Ok(Value::Float(9_223_372_036_854_775_808.0)));
    }
}
