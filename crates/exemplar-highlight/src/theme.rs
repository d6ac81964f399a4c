//! Color themes and stylesheet generation.

use std::fmt::Write;

use crate::token::TokenKind;
use crate::traits::HighlightError;

/// Styling for one token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: &'static str,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub fn color(color: &'static str) -> Self {
        Self {
            color,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// A named highlighting theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: &'static str,
    background: &'static str,
    foreground: &'static str,
    styles: Vec<(TokenKind, Style)>,
}

/// Names of the built-in themes.
pub const THEMES: &[&str] = &["tokyonight-night", "github"];

impl Theme {
    /// Look up a built-in theme by name.
    pub fn by_name(name: &str) -> Result<Self, HighlightError> {
        match name {
            "tokyonight-night" => Ok(Self::tokyonight_night()),
            "github" => Ok(Self::github()),
            _ => Err(HighlightError::UnknownTheme(name.to_string())),
        }
    }

    /// Theme name, also used as the CSS scope class.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Render the stylesheet for markup scoped to this theme.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let scope = format!(".chroma.{}", self.name);

        let _ = writeln!(
            css,
            "{scope} {{ background-color: {}; color: {}; }}",
            self.background, self.foreground
        );

        for (kind, style) in &self.styles {
            let Some(class) = kind.class() else {
                continue;
            };
            let _ = write!(css, "{scope} .{class} {{ color: {};", style.color);
            if style.bold {
                css.push_str(" font-weight: bold;");
            }
            if style.italic {
                css.push_str(" font-style: italic;");
            }
            css.push_str(" }\n");
        }

        css
    }

    fn tokyonight_night() -> Self {
        Self {
            name: "tokyonight-night",
            background: "#1a1b26",
            foreground: "#c0caf5",
            styles: vec![
                (TokenKind::Keyword, Style::color("#bb9af7").italic()),
                (TokenKind::KeywordConstant, Style::color("#ff9e64")),
                (TokenKind::Name, Style::color("#c0caf5")),
                (TokenKind::String, Style::color("#9ece6a")),
                (TokenKind::Number, Style::color("#ff9e64")),
                (TokenKind::Comment, Style::color("#51597d").italic()),
                (TokenKind::Operator, Style::color("#89ddff")),
                (TokenKind::Punctuation, Style::color("#9abdf5")),
                (TokenKind::Prompt, Style::color("#7aa2f7").bold()),
                (TokenKind::Output, Style::color("#a9b1d6")),
            ],
        }
    }

    fn github() -> Self {
        Self {
            name: "github",
            background: "#ffffff",
            foreground: "#24292f",
            styles: vec![
                (TokenKind::Keyword, Style::color("#cf222e")),
                (TokenKind::KeywordConstant, Style::color("#0550ae")),
                (TokenKind::Name, Style::color("#24292f")),
                (TokenKind::String, Style::color("#0a3069")),
                (TokenKind::Number, Style::color("#0550ae")),
                (TokenKind::Comment, Style::color("#6e7781").italic()),
                (TokenKind::Operator, Style::color("#0550ae")),
                (TokenKind::Punctuation, Style::color("#24292f")),
                (TokenKind::Prompt, Style::color("#8250df").bold()),
                (TokenKind::Output, Style::color("#57606a")),
            ],
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::tokyonight_night()
    }
}
