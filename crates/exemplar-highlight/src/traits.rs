//! Trait definitions for highlighters.

use crate::theme::Theme;

/// Errors that can occur while highlighting.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Invalid grammar rule `{pattern}`: {message}")]
    InvalidRule { pattern: String, message: String },

    #[error("Grammar {grammar} has no state named {state}")]
    MissingState { grammar: String, state: String },
}

/// Turns text into styled HTML markup.
pub trait Highlighter {
    /// Tokenize `text` with the grammar registered for `language` and format
    /// it as markup styled by `theme`.
    fn highlight(&self, text: &str, language: &str, theme: &Theme)
        -> Result<String, HighlightError>;

    /// Generate the CSS that styles markup produced for `theme`.
    fn stylesheet(&self, theme: &Theme) -> Result<String, HighlightError>;
}
