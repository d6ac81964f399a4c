//! Literate source parser for annotated example programs.
//!
//! This crate classifies source lines as documentation, code or blank, and
//! folds them into the ordered documentation/code segments a page is built from.

pub mod line;
pub mod parser;
pub mod source;

pub use line::{classify, strip_documentation, LineKind};
pub use parser::{parse_segments, Segment};
pub use source::ExampleSource;
