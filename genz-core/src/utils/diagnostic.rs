use std::{io::Write, path::PathBuf};

pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel},
    files::SimpleFiles,
    term::{self, Config},
};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::src_span::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    fn severity(self) -> Severity {
        match self {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        }
    }

    fn name_and_colour(self) -> (&'static str, Color) {
        match self {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize, style: LabelStyle) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(
            style,
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
    pub extra_labels: Vec<Label>,
}

/// A renderable report. Reports with a [`Location`] are drawn against the
/// source by codespan, the rest get a coloured one-line title.
#[derive(Debug, Clone)]
pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Level::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Level::Warning, title)
    }

    fn new(level: Level, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            level,
            location: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_location(mut self, location: Location<'a>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn write(&self, buf: &mut Buffer) {
        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("text write")
        }
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) {
        let mut files = SimpleFiles::new();
        let file_id = files.add(location.path.to_string_lossy().into_owned(), location.src);

        let labels = std::iter::once(location.label.to_codespan_label(file_id, LabelStyle::Primary))
            .chain(location.extra_labels.iter()
                .map(|label| label.to_codespan_label(file_id, LabelStyle::Secondary)))
            .collect();

        let diagnostic = CodespanDiagnostic::new(self.level.severity())
            .with_message(&self.title)
            .with_labels(labels);

        term::emit(buf, &Config::default(), &files, &diagnostic)
            .expect("write_diagnostic");
    }

    fn write_title(&self, buf: &mut Buffer) {
        let (kind, colour) = self.level.name_and_colour();

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))
            .expect("write_title_color1");
        write!(buf, "{kind}").expect("write_title_kind");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write_title_color2");
        writeln!(buf, ": {}", self.title).expect("write_title_title");

        buf.reset().expect("write_title_reset");
    }
}
