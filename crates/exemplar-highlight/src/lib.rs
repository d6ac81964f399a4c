//! Syntax highlighting for example code and execution transcripts.
//!
//! Grammars are small regex state machines producing classed tokens; themes
//! turn token classes into a stylesheet. The [`Highlighter`] trait is the seam
//! the site builder depends on.

pub mod grammar;
pub mod highlighter;
pub mod html;
pub mod theme;
pub mod token;
pub mod traits;

pub use grammar::{Grammar, Rule};
pub use highlighter::RegexHighlighter;
pub use theme::{Style, Theme};
pub use token::{Token, TokenKind};
pub use traits::{HighlightError, Highlighter};
