use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    UnterminatedString,
    UnknownEscape { ch: char },
    IntegerOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Unexpected character", vec![format!("`{}` is not part of the language", tok.escape_default())])
            },
            LexicalErrorType::UnterminatedString => {
                ("Unterminated string literal", vec!["Add a closing `\"`".into()])
            },
            LexicalErrorType::UnknownEscape { ch } => {
                (
                    "Unknown escape sequence",
                    vec![
                        format!("`\\{}` is not a valid escape", ch.escape_default()),
                        "Supported escapes are `\\n`, `\\t`, `\\\"` and `\\\\`".into(),
                    ]
                )
            },
            LexicalErrorType::IntegerOverflow => {
                ("Integer literal is too large", vec![format!("The largest integer is {}", i64::MAX)])
            }
        }
    }
}
