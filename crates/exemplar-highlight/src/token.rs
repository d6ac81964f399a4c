//! Token kinds produced by grammars.

/// Classification of a highlighted token.
///
/// Class names follow the short Pygments/Chroma convention so existing
/// stylesheets keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unstyled text (whitespace, unmatched characters)
    Text,
    Keyword,
    KeywordConstant,
    Name,
    String,
    Number,
    Comment,
    Operator,
    Punctuation,
    /// Command line of a transcript
    Prompt,
    /// Program output of a transcript
    Output,
}

impl TokenKind {
    /// CSS class for this kind, `None` for plain text.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Keyword => Some("k"),
            Self::KeywordConstant => Some("kc"),
            Self::Name => Some("nx"),
            Self::String => Some("s"),
            Self::Number => Some("m"),
            Self::Comment => Some("c"),
            Self::Operator => Some("o"),
            Self::Punctuation => Some("p"),
            Self::Prompt => Some("gp"),
            Self::Output => Some("go"),
        }
    }
}

/// A slice of input text with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    pub kind: TokenKind,
    pub text: &'t str,
}

impl<'t> Token<'t> {
    pub fn new(kind: TokenKind, text: &'t str) -> Self {
        Self { kind, text }
    }
}
