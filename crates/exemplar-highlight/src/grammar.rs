//! Regex state-machine grammars.
//!
//! A grammar maps state names to ordered rule lists. At each position the
//! first rule of the current state whose pattern matches (anchored, non-empty)
//! wins; its token is emitted and the grammar optionally switches state.
//! Characters no rule matches become plain text.

use std::collections::HashMap;
use std::ops::Range;

use regex::Regex;

use crate::token::{Token, TokenKind};
use crate::traits::HighlightError;

/// Name of the state every grammar starts in.
pub const ROOT_STATE: &str = "root";

/// A single lexing rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    kind: TokenKind,
    next: Option<&'static str>,
}

impl Rule {
    /// Create a rule; `pattern` is anchored at the current position.
    pub fn new(pattern: &str, kind: TokenKind) -> Result<Self, HighlightError> {
        let pattern = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            HighlightError::InvalidRule {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            pattern,
            kind,
            next: None,
        })
    }

    /// Switch to `state` after this rule matches.
    pub fn then(mut self, state: &'static str) -> Self {
        self.next = Some(state);
        self
    }
}

/// A named grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: &'static str,
    aliases: Vec<&'static str>,
    states: HashMap<&'static str, Vec<Rule>>,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            states: HashMap::new(),
        }
    }

    /// Register an alternative name.
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Add a state with its ordered rules.
    pub fn state(mut self, name: &'static str, rules: Vec<Rule>) -> Self {
        self.states.insert(name, rules);
        self
    }

    /// Grammar name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this grammar answers to `language` (case-insensitive).
    pub fn matches(&self, language: &str) -> bool {
        let language = language.to_lowercase();
        self.name == language || self.aliases.iter().any(|a| *a == language)
    }

    /// Split `text` into tokens. Adjacent tokens of the same kind are merged.
    pub fn tokenize<'t>(&self, text: &'t str) -> Result<Vec<Token<'t>>, HighlightError> {
        let mut spans: Vec<(TokenKind, Range<usize>)> = Vec::new();
        let mut state = ROOT_STATE;
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let rules = self
                .states
                .get(state)
                .ok_or_else(|| HighlightError::MissingState {
                    grammar: self.name.to_string(),
                    state: state.to_string(),
                })?;

            let matched = rules.iter().find_map(|rule| {
                rule.pattern
                    .find(rest)
                    .filter(|m| !m.is_empty())
                    .map(|m| (rule, m.end()))
            });

            let (kind, len) = match matched {
                Some((rule, len)) => {
                    if let Some(next) = rule.next {
                        state = next;
                    }
                    (rule.kind, len)
                }
                None => (
                    TokenKind::Text,
                    rest.chars().next().map_or(1, char::len_utf8),
                ),
            };

            match spans.last_mut() {
                Some((last, range)) if *last == kind => range.end = pos + len,
                _ => spans.push((kind, pos..pos + len)),
            }
            pos += len;
        }

        Ok(spans
            .into_iter()
            .map(|(kind, range)| Token::new(kind, &text[range]))
            .collect())
    }

    /// JavaScript grammar.
    pub fn javascript() -> Result<Self, HighlightError> {
        let rules = vec![
            Rule::new(r"\s+", TokenKind::Text)?,
            Rule::new(r"//[^\n]*", TokenKind::Comment)?,
            Rule::new(r"/\*[\s\S]*?\*/", TokenKind::Comment)?,
            Rule::new(r"`(?:[^`\\]|\\[\s\S])*`", TokenKind::String)?,
            Rule::new(r#""(?:[^"\\\n]|\\.)*""#, TokenKind::String)?,
            Rule::new(r"'(?:[^'\\\n]|\\.)*'", TokenKind::String)?,
            Rule::new(
                r"(?:0[xX][0-9a-fA-F_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)n?\b",
                TokenKind::Number,
            )?,
            Rule::new(
                r"(?:async|await|break|case|catch|class|const|continue|debugger|default|delete|do|else|export|extends|finally|for|from|function|if|import|in|instanceof|let|new|of|return|static|super|switch|this|throw|try|typeof|var|void|while|with|yield)\b",
                TokenKind::Keyword,
            )?,
            Rule::new(
                r"(?:true|false|null|undefined|NaN|Infinity)\b",
                TokenKind::KeywordConstant,
            )?,
            Rule::new(r"[A-Za-z_$][\w$]*", TokenKind::Name)?,
            Rule::new(r"[=+\-*/%<>!&|^~?:]+", TokenKind::Operator)?,
            Rule::new(r"[{}()\[\];,.]", TokenKind::Punctuation)?,
        ];

        Ok(Self::new("javascript")
            .alias("js")
            .alias("mjs")
            .state(ROOT_STATE, rules))
    }

    /// Transcript grammar.
    ///
    /// The first `$`-prefixed line is the prompt (its newline excluded); every
    /// byte after that newline is output. Lines before the prompt are output.
    pub fn transcript() -> Result<Self, HighlightError> {
        Ok(Self::new("transcript")
            .alias("console")
            .state(
                ROOT_STATE,
                vec![
                    Rule::new(r"\$[^\n]*", TokenKind::Prompt)?.then("prompt-end"),
                    Rule::new(r"[^\n]*\n", TokenKind::Output)?,
                    Rule::new(r"[^\n]+", TokenKind::Output)?,
                ],
            )
            .state(
                "prompt-end",
                vec![Rule::new(r"\n", TokenKind::Text)?.then("output")],
            )
            .state("output", vec![Rule::new(r"[\s\S]+", TokenKind::Output)?]))
    }
}
