use tracing::trace;

use crate::{lexer::prelude::{LexResult, LexicalError, Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{BinaryOperator, Module, Node, Parsed, Precedence, Program};

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub comments: Vec<SrcSpan>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            comments: vec![],
            lex_errors: vec![],

            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    /// Advances by one token. Comments are collected on the side; the first
    /// lexical error ends the token stream.
    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        if self.lex_errors.is_empty() {
            loop {
                match self.tokens.next() {
                    Some(Ok((start, Token::Comment, end))) => {
                        self.comments.push(SrcSpan { start, end })
                    },
                    Some(Err(err)) => {
                        self.lex_errors.push(err);

                        break;
                    },
                    Some(Ok(tok)) => {
                        next = Some(tok);

                        break;
                    },
                    None => {
                        break;
                    }
                }
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let program = self.parse_program();

        if let Some(error) = self.lex_errors.first() {
            return parse_error(
                ParseErrorType::LexError { error: *error },
                error.location
            );
        }

        let module = Module {
            name: "".into(),
            program: program?
        };

        Ok(Parsed {
            module,
            comments: std::mem::take(&mut self.comments)
        })
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let start = match &self.current_token {
            Some((start, _, _)) => *start,
            None => 0
        };

        let statements = self.parse_statements(Token::Eof)?;

        let end = match &self.current_token {
            Some((_, Token::Eof, end)) => *end,
            _ => return self.unexpected(vec!["end of file".into()])
        };

        trace!(statements = statements.len(), "parsed program");

        Ok(Program {
            root: Node::sequence(statements),
            location: SrcSpan { start, end }
        })
    }

    /// Statements up to, but not including, `terminator`.
    fn parse_statements(&mut self, terminator: Token) -> Result<Vec<Node>, ParseError> {
        let mut statements = vec![];

        loop {
            match &self.current_token {
                Some((_, token, _)) if *token == terminator => break,
                Some(_) => {
                    if let Some(statement) = self.parse_statement()? {
                        statements.push(statement);
                    }
                },
                None => return self.unexpected(vec![terminator.as_literal()])
            }
        }

        Ok(statements)
    }

    // statement -> ; | spill <expr> ; | <ident> = <expr> ; | <if> | <while>
    fn parse_statement(&mut self) -> Result<Option<Node>, ParseError> {
        let statement = match &self.current_token {
            Some((_, Token::Semicolon, _)) => {
                self.step();
                return Ok(None);
            },
            Some((_, Token::Spill, _)) => {
                self.step();
                let expr = self.parse_expression(Precedence::Lowest)?;
                self.expect_one(Token::Semicolon)?;

                Node::print(expr)
            },
            Some((_, Token::Ident(_), _)) => {
                let (_, name, _) = self.expect_ident()?;
                self.expect_one(Token::Assign)?;
                let expr = self.parse_expression(Precedence::Lowest)?;
                self.expect_one(Token::Semicolon)?;

                Node::assign(name, expr)
            },
            Some((_, Token::If, _)) => self.parse_conditional()?,
            Some((_, Token::While, _)) => {
                self.step();
                let condition = self.parse_condition()?;
                let body = self.parse_block()?;

                Node::while_loop(condition, body)
            },
            _ => return self.unexpected(vec![
                "`spill`".into(),
                "`if`".into(),
                "`while`".into(),
                "an assignment".into(),
            ])
        };

        Ok(Some(statement))
    }

    // if -> if ( <expr> ) <block> [ else ( <block> | <if> ) ]
    fn parse_conditional(&mut self) -> Result<Node, ParseError> {
        self.expect_one(Token::If)?;
        let condition = self.parse_condition()?;
        let resolution = self.parse_block()?;

        let alternative = match &self.current_token {
            Some((_, Token::Else, _)) => {
                self.step();

                match &self.current_token {
                    Some((_, Token::If, _)) => Some(self.parse_conditional()?),
                    _ => Some(self.parse_block()?)
                }
            },
            _ => None
        };

        Ok(Node::conditional(condition, resolution, alternative))
    }

    fn parse_condition(&mut self) -> Result<Node, ParseError> {
        self.expect_one(Token::LParen)?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_one(Token::RParen)?;

        Ok(condition)
    }

    /// An empty block becomes a literal, which evaluates to nothing.
    fn parse_block(&mut self) -> Result<Node, ParseError> {
        self.expect_one(Token::LBrace)?;
        let statements = self.parse_statements(Token::RBrace)?;
        self.expect_one(Token::RBrace)?;

        Ok(Node::sequence(statements).unwrap_or_else(|| Node::int(0)))
    }

    pub fn parse_expression(&mut self, precedence: Precedence) -> Result<Node, ParseError> {
        let mut left = self.parse_primary()?;

        while precedence < self.current_precedence() {
            let operator = match &self.current_token {
                Some((_, token, _)) => BinaryOperator::from_token(token),
                None => None
            };

            let Some(operator) = operator else {
                break;
            };

            self.step();
            let right = self.parse_expression(operator.precedence())?;

            left = Node::binary(operator, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        match self.current_token.take() {
            Some((_, Token::Int(value), _)) => {
                self.step();
                Ok(Node::int(value))
            },
            Some((_, Token::Str(value), _)) => {
                self.step();
                Ok(Node::string(value))
            },
            Some((_, Token::Ident(name), _)) => {
                self.step();
                Ok(Node::ident(name))
            },
            Some((_, Token::LParen, _)) => {
                self.step();

                let expr = self.parse_expression(Precedence::Lowest)?;
                self.expect_one(Token::RParen)?;

                Ok(expr)
            },
            Some((start, Token::Eof, end)) => {
                self.current_token = Some((start, Token::Eof, end));

                parse_error(ParseErrorType::UnexpectedEof, SrcSpan { start, end })
            },
            Some((start, token, end)) => {
                self.current_token = Some((start, token, end));

                parse_error(ParseErrorType::ExpectedExpression, SrcSpan { start, end })
            },
            None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan::default())
        }
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            t => {
                self.current_token = t;

                self.unexpected(vec![format!("`{}`", token.as_literal())])
            }
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            Some(t) => {
                let (start, _, end) = t;
                self.current_token = Some(t);

                parse_error(
                    ParseErrorType::ExpectedIdent,
                    SrcSpan { start, end }
                )
            },
            None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan::default())
        }
    }

    /// Error for whatever the current token is, given what was expected.
    fn unexpected<R>(&self, expected: Vec<String>) -> Result<R, ParseError> {
        match &self.current_token {
            Some((start, Token::Eof, end)) => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: *start, end: *end }
            ),
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: token.clone(),
                    expected,
                },
                SrcSpan { start: *start, end: *end }
            ),
            None => parse_error(ParseErrorType::UnexpectedEof, SrcSpan::default())
        }
    }
}

pub fn parse_module(src: &str) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
