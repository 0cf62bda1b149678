use std::fmt::Display;

/// Byte range into the source text, `end` exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn new(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	pub fn point(at: u32) -> Self {
		Self { start: at, end: at }
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}
