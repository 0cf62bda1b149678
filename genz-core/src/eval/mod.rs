pub mod error;
pub mod operators;

pub mod prelude {
    pub use super::{
        error::*,
        operators::*,
        execute,
        Interpreter,
        Outcome,
    };
}

#[cfg(test)]
mod tests;

use std::io::Write;

use tracing::{debug, trace};

use crate::{
    environment::prelude::{Environment, Value, UNIT},
    parser::prelude::Node
};

use self::{
    error::{Operation, RuntimeError},
    operators::{apply, integer}
};

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ok,
    Fatal(RuntimeError),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }

    /// Process exit code for the driver: `0` on completion, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Ok => 0,
            Outcome::Fatal(_) => 1,
        }
    }

    pub fn into_result(self) -> Result<(), RuntimeError> {
        match self {
            Outcome::Ok => Ok(()),
            Outcome::Fatal(err) => Err(err),
        }
    }
}

impl From<Result<Value, RuntimeError>> for Outcome {
    fn from(result: Result<Value, RuntimeError>) -> Self {
        match result {
            Ok(_) => Outcome::Ok,
            Err(err) => Outcome::Fatal(err),
        }
    }
}

/// Runs `root` in a fresh environment, writing `spill` lines to `out`.
pub fn execute(root: &Node, out: impl Write) -> Outcome {
    let mut interpreter = Interpreter::new(out);

    let outcome = Outcome::from(interpreter.evaluate(root));

    match &outcome {
        Outcome::Ok => debug!(variables = interpreter.environment().len(), "run completed"),
        Outcome::Fatal(err) => debug!(%err, "run aborted"),
    }

    outcome
}

/// Tree-walking evaluator. Owns the variable bindings and the output sink of
/// one run; several `evaluate` calls on the same interpreter share bindings.
///
/// Statement sequences are walked iteratively. Nested blocks and expressions
/// recurse once per level, so their depth is bounded by the native stack of
/// the calling thread.
pub struct Interpreter<W: Write> {
    env: Environment,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_environment(Environment::new(), out)
    }

    pub fn with_environment(env: Environment, out: W) -> Self {
        Self { env, out }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (Environment, W) {
        (self.env, self.out)
    }

    /// Evaluates `node`, stopping at the first fatal error. Statements give
    /// back `Integer 0`, expressions their value.
    pub fn evaluate(&mut self, node: &Node) -> Result<Value, RuntimeError> {
        trace!(node = node.kind(), "evaluate");

        match node {
            Node::List { left, right } => {
                self.evaluate(left)?;

                let mut rest = right;
                while let Node::List { left, right } = rest.as_ref() {
                    self.evaluate(left)?;
                    rest = right;
                }

                self.evaluate(rest)?;

                Ok(UNIT)
            },
            Node::Literal { value } => Ok(value.clone()),
            Node::Identifier { name } => self.env.lookup(name),
            Node::Assignment { name, expr } => {
                let value = self.evaluate(expr)?;

                debug!(name = name.as_str(), %value, "store");
                self.env.store(name.as_str(), value);

                Ok(UNIT)
            },
            Node::Print { expr } => {
                let value = self.evaluate(expr)?;

                writeln!(self.out, "{value}")?;
                self.out.flush()?;

                Ok(UNIT)
            },
            Node::Conditional { condition, resolution, alternative } => {
                if self.truthiness(condition)? {
                    self.evaluate(resolution)?;
                } else if let Some(alternative) = alternative {
                    self.evaluate(alternative)?;
                }

                Ok(UNIT)
            },
            Node::Loop { condition, body } => {
                while self.truthiness(condition)? {
                    self.evaluate(body)?;
                }

                Ok(UNIT)
            },
            Node::BinaryOp { operator, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;

                apply(*operator, &left, &right)
            }
        }
    }

    fn truthiness(&mut self, condition: &Node) -> Result<bool, RuntimeError> {
        let value = self.evaluate(condition)?;

        Ok(integer(&value, Operation::Condition)? != 0)
    }
}
