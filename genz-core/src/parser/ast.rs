use std::fmt::Display;

use crate::{
    environment::prelude::Value,
    lexer::prelude::Token,
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub module: Module,
    pub comments: Vec<SrcSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub program: Program
}

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// `None` for a source without statements.
    pub root: Option<Node>,
    pub location: SrcSpan
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => Ok(())
        }
    }
}

/// A program tree. Each node owns its children; statement sequences are a
/// right-leaning chain of `List` nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    List {
        left: Box<Node>,
        right: Box<Node>,
    },
    Literal {
        value: Value,
    },
    Identifier {
        name: String,
    },
    Assignment {
        name: String,
        expr: Box<Node>,
    },
    Print {
        expr: Box<Node>,
    },
    Conditional {
        condition: Box<Node>,
        resolution: Box<Node>,
        alternative: Option<Box<Node>>,
    },
    Loop {
        condition: Box<Node>,
        body: Box<Node>,
    },
    BinaryOp {
        operator: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn list(left: Node, right: Node) -> Self {
        Self::List { left: Box::new(left), right: Box::new(right) }
    }

    pub fn literal(value: Value) -> Self {
        Self::Literal { value }
    }

    pub fn int(value: i64) -> Self {
        Self::literal(Value::Integer { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(Value::String { value: value.into() })
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn assign(name: impl Into<String>, expr: Node) -> Self {
        Self::Assignment { name: name.into(), expr: Box::new(expr) }
    }

    pub fn print(expr: Node) -> Self {
        Self::Print { expr: Box::new(expr) }
    }

    pub fn conditional(condition: Node, resolution: Node, alternative: Option<Node>) -> Self {
        Self::Conditional {
            condition: Box::new(condition),
            resolution: Box::new(resolution),
            alternative: alternative.map(Box::new),
        }
    }

    pub fn while_loop(condition: Node, body: Node) -> Self {
        Self::Loop { condition: Box::new(condition), body: Box::new(body) }
    }

    pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Self {
        Self::BinaryOp { operator, left: Box::new(left), right: Box::new(right) }
    }

    /// Chains statements into `List(s1, List(s2, ... sn))`. A single
    /// statement stays unwrapped.
    pub fn sequence(statements: impl IntoIterator<Item = Node>) -> Option<Self> {
        let statements = statements.into_iter().collect::<Vec<_>>();

        statements.into_iter()
            .rev()
            .reduce(|rest, statement| Node::list(statement, rest))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::List { .. } => "list",
            Node::Literal { .. } => "literal",
            Node::Identifier { .. } => "identifier",
            Node::Assignment { .. } => "assignment",
            Node::Print { .. } => "print",
            Node::Conditional { .. } => "conditional",
            Node::Loop { .. } => "loop",
            Node::BinaryOp { .. } => "binary operation",
        }
    }

    /// Whether this node is a statement (as opposed to an expression).
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::List { .. }
            | Node::Assignment { .. }
            | Node::Print { .. }
            | Node::Conditional { .. }
            | Node::Loop { .. }
        )
    }

    fn precedence(&self) -> Option<Precedence> {
        match self {
            Node::BinaryOp { operator, .. } => Some(operator.precedence()),
            _ => None
        }
    }

    fn fmt_operand(&self, f: &mut std::fmt::Formatter<'_>, parenthesize: bool) -> std::fmt::Result {
        if parenthesize {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }

    fn fmt_block(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_statement() {
            write!(f, "{{ {self} }}")
        } else {
            write!(f, "{{ }}")
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::List { left, right } => {
                write!(f, "{left}")?;

                let mut rest = right;
                while let Node::List { left, right } = rest.as_ref() {
                    write!(f, " {left}")?;
                    rest = right;
                }

                write!(f, " {rest}")
            },
            Node::Literal { value } => write!(f, "{}", value.as_literal()),
            Node::Identifier { name } => write!(f, "{name}"),
            Node::Assignment { name, expr } => write!(f, "{name} = {expr};"),
            Node::Print { expr } => write!(f, "spill {expr};"),
            Node::Conditional { condition, resolution, alternative } => {
                write!(f, "if ({condition}) ")?;
                resolution.fmt_block(f)?;

                match alternative {
                    Some(alternative) => {
                        write!(f, " else ")?;
                        alternative.fmt_block(f)
                    },
                    None => Ok(())
                }
            },
            Node::Loop { condition, body } => {
                write!(f, "while ({condition}) ")?;
                body.fmt_block(f)
            },
            Node::BinaryOp { operator, left, right } => {
                let precedence = operator.precedence();

                left.fmt_operand(f, left.precedence().is_some_and(|p| p < precedence))?;
                write!(f, " {} ", operator.as_literal())?;
                right.fmt_operand(f, right.precedence().is_some_and(|p| p <= precedence))
            }
        }
    }
}

// Unlinks the right spine of a statement list one node at a time, so long
// programs do not drop recursively.
impl Drop for Node {
    fn drop(&mut self) {
        let Node::List { right, .. } = self else {
            return;
        };

        let mut next = std::mem::replace(right, Box::new(Node::int(0)));

        loop {
            let rest = match next.as_mut() {
                Node::List { right, .. } => std::mem::replace(right, Box::new(Node::int(0))),
                _ => break,
            };

            next = rest;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Sub,
            Token::Asterisk => Self::Mul,
            Token::Slash => Self::Div,
            Token::Equal => Self::Equal,
            Token::NotEqual => Self::NotEqual,
            Token::GreaterThan => Self::GreaterThan,
            Token::LessThan => Self::LessThan,
            Token::GreaterThanOrEqual => Self::GreaterThanOrEqual,
            Token::LessThanOrEqual => Self::LessThanOrEqual,
            _ => return None
        })
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Equal | Self::NotEqual => Precedence::Equals,
            Self::GreaterThan | Self::LessThan |
            Self::GreaterThanOrEqual | Self::LessThanOrEqual => Precedence::LessGreater,
            Self::Add | Self::Sub => Precedence::Sum,
            Self::Mul | Self::Div => Precedence::Product,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match BinaryOperator::from_token(value) {
            Some(operator) => operator.precedence(),
            None => Self::Lowest,
        }
    }
}
