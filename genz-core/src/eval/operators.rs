use crate::{
    environment::prelude::Value,
    parser::prelude::BinaryOperator
};

use super::error::{Operation, RuntimeError};

/// Integer payload of `value`. Text never converts to a number.
pub fn integer(value: &Value, operation: Operation) -> Result<i64, RuntimeError> {
    match value {
        Value::Integer { value } => Ok(*value),
        other => Err(RuntimeError::TypeMismatch {
            operation,
            found: other._type(),
        })
    }
}

/// Applies `operator` to two already evaluated operands. Arithmetic wraps on
/// overflow, division truncates toward zero and comparisons give `1` or `0`.
pub fn apply(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let left = integer(left, Operation::Operand(operator))?;
    let right = integer(right, Operation::Operand(operator))?;

    let result = match operator {
        BinaryOperator::Add => Value::from(left.wrapping_add(right)),
        BinaryOperator::Sub => Value::from(left.wrapping_sub(right)),
        BinaryOperator::Mul => Value::from(left.wrapping_mul(right)),
        BinaryOperator::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }

            Value::from(left.wrapping_div(right))
        },
        BinaryOperator::Equal => Value::from(left == right),
        BinaryOperator::NotEqual => Value::from(left != right),
        BinaryOperator::GreaterThan => Value::from(left > right),
        BinaryOperator::LessThan => Value::from(left < right),
        BinaryOperator::GreaterThanOrEqual => Value::from(left >= right),
        BinaryOperator::LessThanOrEqual => Value::from(left <= right),
    };

    Ok(result)
}
