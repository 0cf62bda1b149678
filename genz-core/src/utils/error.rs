use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    utils::prelude::SrcSpan,
    parser::prelude::{ParseError, ParseErrorType},
};
use super::diagnostic::{Diagnostic, Label, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("program aborted: {error}")]
    Runtime {
        path: PathBuf,
        error: RuntimeError
    },
    #[error("could not read file {}", .path.display())]
    FileIo {
        path: PathBuf,
        err: std::io::ErrorKind
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StdIo { err: err.kind() }
    }
}

impl Error {
    pub fn file_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Error::FileIo { path: path.into(), err: err.kind() }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                let adjusted_location = if matches!(error.error, ParseErrorType::UnexpectedEof) {
                    SrcSpan::point(src.len() as u32)
                } else {
                    error.span
                };

                vec![Diagnostic::error("Syntax error")
                    .with_text(text)
                    .with_location(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: adjusted_location,
                        },
                        extra_labels: vec![],
                    })]
            },
            Error::Runtime { path, error } => {
                let title = match error {
                    RuntimeError::UndefinedVariable { .. } => "Undefined variable",
                    RuntimeError::DivisionByZero => "Division by zero",
                    RuntimeError::TypeMismatch { .. } => "Type mismatch",
                    RuntimeError::Io { .. } => "Output failed",
                };

                let hint = match error {
                    RuntimeError::UndefinedVariable { name } => {
                        format!("Assign `{name}` before reading it, e.g. `{name} = 0;`")
                    },
                    RuntimeError::TypeMismatch { .. } => {
                        "Text values can only be assigned and spilled".to_string()
                    },
                    _ => String::new(),
                };

                let text = std::iter::once(format!("{error} (while running {})", path.display()))
                    .chain((!hint.is_empty()).then_some(hint))
                    .collect::<Vec<String>>()
                    .join("\n");

                vec![Diagnostic::error(title).with_text(text)]
            },
            Error::FileIo { path, err } => {
                vec![Diagnostic::error(format!("Could not read file `{}`", path.display()))
                    .with_text(err.to_string())]
            },
            Error::StdIo { err } => {
                vec![Diagnostic::error("Standard IO error").with_text(err.to_string())]
            }
        }
    }
}
