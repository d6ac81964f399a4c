//! Segment parser.

use crate::line::{classify, strip_documentation, LineKind};

/// One documentation/code unit of an example.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    /// Explanatory text (at most one line, may be empty)
    pub documentation: String,

    /// Newline-joined code lines following the documentation
    pub code: String,
}

impl Segment {
    /// Create a segment from its parts.
    pub fn new(documentation: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            documentation: documentation.into(),
            code: code.into(),
        }
    }

    /// Check if the segment carries neither documentation nor code.
    pub fn is_empty(&self) -> bool {
        self.documentation.is_empty() && self.code.is_empty()
    }

    fn push_code(&mut self, line: &str) {
        if !self.code.is_empty() {
            self.code.push('\n');
        }
        self.code.push_str(line.trim_end());
    }
}

/// Split source lines into segments.
///
/// A blank line closes the in-progress segment (even an empty one). A
/// documentation line replaces the segment's documentation, a code line is
/// appended to its code block. The segment still open at end of input is
/// kept when it has any content.
pub fn parse_segments<'a, I>(lines: I) -> Vec<Segment>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut segments = Vec::new();
    let mut current = Segment::default();

    for line in lines {
        match classify(line) {
            LineKind::Blank => segments.push(std::mem::take(&mut current)),
            LineKind::Documentation => {
                current.documentation = strip_documentation(line).to_string();
            }
            LineKind::Code => current.push_code(line),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
