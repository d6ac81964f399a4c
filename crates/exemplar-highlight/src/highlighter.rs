//! Grammar-registry highlighter.

use crate::grammar::Grammar;
use crate::html::format_tokens;
use crate::theme::Theme;
use crate::traits::{HighlightError, Highlighter};

/// Highlighter backed by a registry of regex grammars.
#[derive(Debug, Clone)]
pub struct RegexHighlighter {
    grammars: Vec<Grammar>,
}

impl RegexHighlighter {
    /// Create a highlighter with the built-in JavaScript and transcript grammars.
    pub fn new() -> Result<Self, HighlightError> {
        Ok(Self {
            grammars: vec![Grammar::javascript()?, Grammar::transcript()?],
        })
    }

    /// Register an additional grammar. Later registrations win on name clashes.
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammars.insert(0, grammar);
        self
    }

    /// Look up a grammar by name or alias.
    pub fn grammar(&self, language: &str) -> Option<&Grammar> {
        self.grammars.iter().find(|g| g.matches(language))
    }
}

impl Highlighter for RegexHighlighter {
    fn highlight(
        &self,
        text: &str,
        language: &str,
        theme: &Theme,
    ) -> Result<String, HighlightError> {
        let grammar = self
            .grammar(language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_string()))?;

        let tokens = grammar.tokenize(text)?;

        Ok(format_tokens(&tokens, theme))
    }

    fn stylesheet(&self, theme: &Theme) -> Result<String, HighlightError> {
        Ok(theme.to_css())
    }
}
