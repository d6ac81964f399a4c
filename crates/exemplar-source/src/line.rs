//! Line classification.

use regex::Regex;
use std::sync::LazyLock;

/// Comment marker (`//` or `#`) followed by whitespace or end of line.
static DOC_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?://|#)(?:\s|$)").expect("Invalid documentation line regex")
});

/// Kind of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Explanatory comment line
    Documentation,
    /// Anything that is neither blank nor documentation
    Code,
    /// Empty or whitespace-only line
    Blank,
}

/// Classify one line of source text.
///
/// Total over all inputs: a malformed comment shape such as `//x` or a
/// shebang is simply code.
pub fn classify(line: &str) -> LineKind {
    if line.trim().is_empty() {
        LineKind::Blank
    } else if DOC_LINE_RE.is_match(line) {
        LineKind::Documentation
    } else {
        LineKind::Code
    }
}

/// Strip the comment marker, surrounding slashes and whitespace from a
/// documentation line.
pub fn strip_documentation(line: &str) -> &str {
    let trimmed = line.trim();
    let text = trimmed
        .strip_prefix("//")
        .or_else(|| trimmed.strip_prefix('#'))
        .unwrap_or(trimmed);
    text.trim_matches(|c: char| c == '/' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_table_of_lines() {
        let cases = [
            ("", LineKind::Blank),
            ("   ", LineKind::Blank),
            ("\t \t", LineKind::Blank),
            ("// a comment", LineKind::Documentation),
            ("    // indented comment", LineKind::Documentation),
            ("//", LineKind::Documentation),
            ("  //", LineKind::Documentation),
            ("# hash comment", LineKind::Documentation),
            ("#", LineKind::Documentation),
            ("//\tTabbed", LineKind::Documentation),
            ("//no space", LineKind::Code),
            ("#!/usr/bin/env node", LineKind::Code),
            ("const url = 'http://example.com'", LineKind::Code),
            ("console.log(1) // trailing", LineKind::Code),
            ("/* block */", LineKind::Code),
            ("  return x", LineKind::Code),
        ];

        for (line, expected) in cases {
            assert_eq!(classify(line), expected, "line {:?}", line);
        }
    }

    #[test]
    fn whitespace_only_is_always_blank() {
        for line in [" ", "\t", "\r", " \t \r ", "\u{a0}\u{2003}"] {
            assert_eq!(classify(line), LineKind::Blank, "line {:?}", line);
        }
    }

    #[test]
    fn strips_markers_and_slashes() {
        assert_eq!(strip_documentation("// First explanation"), "First explanation");
        assert_eq!(strip_documentation("  ///  Triple slashes //"), "Triple slashes");
        assert_eq!(strip_documentation("# Hash comment "), "Hash comment");
        assert_eq!(strip_documentation("//"), "");
        assert_eq!(
            strip_documentation("// See [docs](https://example.com/)"),
            "See [docs](https://example.com/)"
        );
    }
}
