#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // <letter|_>{<letter>|<digit>|_}
    Ident(String),
    // {<digit>}
    Int(i64),
    // "..." with escapes already resolved
    Str(String),
    // # comment until end of line
    Comment,

    // Relational operators
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // Additive operators
    Plus, // +
    Minus, // -

    // Multiplicative operators
    Asterisk, // *
    Slash, // /

    Assign, // =

    // Keywords
    Spill, // spill
    If, // if
    Else, // else
    While, // while

    // Delimiters
    Semicolon, // ;
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }

    Eof,
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(
            self,
            Token::Spill
            | Token::If
            | Token::Else
            | Token::While
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.to_string(),
            Token::Int(value) => value.to_string(),
            Token::Str(value) => format!("{value:?}"),
            Token::Comment => "#".to_string(),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Asterisk => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Assign => "=".to_string(),

            Token::Spill => "spill".to_string(),
            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::While => "while".to_string(),

            Token::Semicolon => ";".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),

            Token::Eof => "end of file".to_string(),
        }
    }
}
