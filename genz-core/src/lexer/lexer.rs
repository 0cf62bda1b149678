use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"spill" => Token::Spill,
		"if" => Token::If,
		"else" => Token::Else,
		"while" => Token::While,

		_ => return None
	})
}

/// Streaming lexer over `(byte offset, char)` pairs, as produced by
/// `str::char_indices`. Yields `Token::Eof` exactly once and then stops.
#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	ch: Option<(u32, char)>,
	next_ch: Option<(u32, char)>,
	end: u32,
	finished: bool,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.offset(), self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            ch: None,
			next_ch: None,
			end: 0,
			finished: false,
            input,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		loop {
			let Some((_, ch)) = self.ch else {
				return Ok(self.eat_eof());
			};

			let spanned = match ch {
				'#' => self.lex_comment(),
				'"' => return self.lex_string(),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				';' => self.eat_one_char(Token::Semicolon),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Asterisk),
				'/' => self.eat_one_char(Token::Slash),
				'=' => self.eat_with_equals(Token::Assign, Token::Equal),
				'<' => self.eat_with_equals(Token::LessThan, Token::LessThanOrEqual),
				'>' => self.eat_with_equals(Token::GreaterThan, Token::GreaterThanOrEqual),
				'!' if matches!(self.next_ch, Some((_, '='))) => {
					self.eat_with_equals(Token::NotEqual, Token::NotEqual)
				},
				'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
				'0'..='9' => return self.lex_number(),
				c if c.is_whitespace() => {
					let _ = self.next_char();
					continue;
				},
				c => {
					let start = self.offset();
					let _ = self.next_char();

					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan::new(start, self.offset()),
					});
				}
			};

			return Ok(spanned);
		}
    }

	fn offset(&self) -> u32 {
		match self.ch {
			Some((pos, _)) => pos,
			None => self.end,
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let current = self.ch.take();

		if let Some((pos, ch)) = current {
			self.end = pos + ch.len_utf8() as u32;
		}

		self.ch = self.next_ch.take();
		self.next_ch = self.input.next();

		current.map(|(_, ch)| ch)
	}

	fn eat_eof(&mut self) -> Spanned {
		self.finished = true;
		let pos = self.offset();

		(pos, Token::Eof, pos)
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.offset();
		self.next_char();
		let end_pos = self.offset();

		(start_pos, token, end_pos)
	}

	/// `single` on its own, `double` when directly followed by `=`.
	fn eat_with_equals(&mut self, single: Token, double: Token) -> Spanned {
		let start_pos = self.offset();
		self.next_char();

		let token = match self.ch {
			Some((_, '=')) => {
				self.next_char();
				double
			},
			_ => single
		};

		(start_pos, token, self.offset())
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.offset();
		let mut ident = String::new();

		while let Some((_, ch)) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			let _ = self.next_char();
		}

        let end_pos = self.offset();

        match str_to_keyword(&ident) {
			Some(keyword) => (start_pos, keyword, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos)
		}
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.offset();
		let mut value = String::new();

		while let Some((_, ch)) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			value.push(ch);
			let _ = self.next_char();
		}

		let end_pos = self.offset();

		match value.parse::<i64>() {
			Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::IntegerOverflow,
				location: SrcSpan::new(start_pos, end_pos)
			})
		}
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.offset();
		let mut value = String::new();

		self.next_char(); // opening quote

		loop {
			match self.next_char() {
				Some('"') => break,
				Some('\\') => {
					let escape_pos = self.offset();

					match self.next_char() {
						Some('n') => value.push('\n'),
						Some('t') => value.push('\t'),
						Some('"') => value.push('"'),
						Some('\\') => value.push('\\'),
						Some(ch) => return Err(LexicalError {
							error: LexicalErrorType::UnknownEscape { ch },
							location: SrcSpan::new(escape_pos - 1, self.offset())
						}),
						None => return Err(LexicalError {
							error: LexicalErrorType::UnterminatedString,
							location: SrcSpan::new(start_pos, self.offset())
						})
					}
				},
				Some(ch) => value.push(ch),
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					location: SrcSpan::new(start_pos, self.offset())
				})
			}
		}

		Ok((start_pos, Token::Str(value), self.offset()))
	}

	fn lex_comment(&mut self) -> Spanned {
		let start_pos = self.offset();

		while let Some((_, ch)) = self.ch {
			if ch == '\n' {
				break;
			}

			let _ = self.next_char();
		}

		(start_pos, Token::Comment, self.offset())
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		Some(self.next_token())
	}
}
