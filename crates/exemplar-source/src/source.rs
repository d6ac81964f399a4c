//! Parsed example source.

use crate::line::{classify, strip_documentation, LineKind};
use crate::parser::{parse_segments, Segment};

/// The literate content of one example.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleSource {
    /// Page summary: the first documentation line
    pub description: String,

    /// Ordered documentation/code segments
    pub segments: Vec<Segment>,
}

impl ExampleSource {
    /// Parse example source text.
    ///
    /// The first `header_lines` lines are kept out of segmentation and only
    /// searched for the description. With no header, the description is the
    /// first documentation line of the whole source.
    pub fn parse(source: &str, header_lines: usize) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let (header, body) = lines.split_at(header_lines.min(lines.len()));

        let description_lines = if header_lines > 0 { header } else { body };
        let description = first_documentation(description_lines)
            .unwrap_or_default()
            .to_string();

        Self {
            description,
            segments: parse_segments(body.iter().copied()),
        }
    }
}

fn first_documentation<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines
        .iter()
        .copied()
        .find(|line| classify(line) == LineKind::Documentation)
        .map(strip_documentation)
}
