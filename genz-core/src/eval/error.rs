use std::fmt::Display;

use thiserror::Error;

use crate::{environment::prelude::ValueType, parser::prelude::BinaryOperator};

/// Conditions that abort a run. None of them can be caught by a program.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("undefined variable `{name}`")]
    UndefinedVariable {
        name: String
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("expected an Integer as {operation}, found a {found}")]
    TypeMismatch {
        operation: Operation,
        found: ValueType,
    },
    #[error("failed to write output: {err}")]
    Io {
        err: std::io::ErrorKind
    },
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        RuntimeError::Io { err: err.kind() }
    }
}

/// Where an integer was required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Condition,
    Operand(BinaryOperator),
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Condition => write!(f, "condition"),
            Operation::Operand(operator) => write!(f, "operand of `{operator}`"),
        }
    }
}
