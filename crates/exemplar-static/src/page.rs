//! Example pages: rows of documentation beside highlighted code.

use exemplar_highlight::{Highlighter, Theme};
use exemplar_source::{ExampleSource, Segment};
use pulldown_cmark::{html, Options, Parser};

use crate::error::BuildError;
use crate::registry::ExampleEntry;
use crate::templates::{ExampleContext, IndexEntry, Row, TemplateEngine};

/// Language name of the transcript grammar.
pub const TRANSCRIPT_LANGUAGE: &str = "transcript";

/// A fully parsed example ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub segments: Vec<Segment>,
    pub digest: String,
    pub previous_id: Option<String>,
    pub next_id: Option<String>,
}

impl Example {
    /// Combine a registry entry with its parsed source and digest.
    pub fn new(entry: &ExampleEntry, source: ExampleSource, digest: String) -> Self {
        Self {
            id: entry.id.clone(),
            display_name: entry.display_name.clone(),
            description: source.description,
            segments: source.segments,
            digest,
            previous_id: entry.previous_id.clone(),
            next_id: entry.next_id.clone(),
        }
    }

    /// Entry for the index page.
    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            id: self.id.clone(),
            name: self.display_name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Render markdown to HTML.
pub fn render_markdown(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(text, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Renders example and index pages through the template engine.
pub struct PageRenderer<'a> {
    templates: &'a TemplateEngine,
    highlighter: &'a dyn Highlighter,
    theme: &'a Theme,
    language: &'a str,
    site_title: &'a str,
}

impl<'a> PageRenderer<'a> {
    pub fn new(
        templates: &'a TemplateEngine,
        highlighter: &'a dyn Highlighter,
        theme: &'a Theme,
        language: &'a str,
        site_title: &'a str,
    ) -> Self {
        Self {
            templates,
            highlighter,
            theme,
            language,
            site_title,
        }
    }

    /// Highlight a transcript with the transcript grammar.
    pub fn highlight_transcript(&self, transcript: &str) -> Result<String, BuildError> {
        Ok(self
            .highlighter
            .highlight(transcript, TRANSCRIPT_LANGUAGE, self.theme)?)
    }

    /// Build the page rows: the description, one row per segment, then the
    /// transcript.
    pub fn rows(&self, example: &Example, transcript_markup: &str) -> Result<Vec<Row>, BuildError> {
        let mut rows = Vec::with_capacity(example.segments.len() + 2);

        rows.push(Row {
            markdown: render_markdown(&example.description),
            code_block: String::new(),
        });

        for segment in &example.segments {
            let code_block = if segment.code.is_empty() {
                String::new()
            } else {
                self.highlighter
                    .highlight(&segment.code, self.language, self.theme)?
            };

            rows.push(Row {
                markdown: render_markdown(&segment.documentation),
                code_block,
            });
        }

        rows.push(Row {
            markdown: String::new(),
            code_block: transcript_markup.to_string(),
        });

        Ok(rows)
    }

    /// Render the page for `example`.
    pub fn render_example(
        &self,
        example: &Example,
        transcript_markup: &str,
    ) -> Result<String, BuildError> {
        let page = ExampleContext {
            site_title: self.site_title.to_string(),
            name: example.display_name.clone(),
            id: example.id.clone(),
            description: example.description.clone(),
            previous_id: example.previous_id.clone(),
            next_id: example.next_id.clone(),
            rows: self.rows(example, transcript_markup)?,
        };

        Ok(self.templates.render_example(&page)?)
    }

    /// Render the index page listing `examples` in order.
    pub fn render_index(&self, examples: &[IndexEntry]) -> Result<String, BuildError> {
        Ok(self.templates.render_index(self.site_title, examples)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exemplar_highlight::RegexHighlighter;
    use pretty_assertions::assert_eq;

    fn example(source: &str) -> Example {
        let entry = ExampleEntry {
            id: "strings".to_string(),
            display_name: "Strings".to_string(),
            dir: "examples/strings".into(),
            source_path: "examples/strings/strings.js".into(),
            previous_id: None,
            next_id: Some("numbers".to_string()),
        };
        Example::new(&entry, ExampleSource::parse(source, 0), "abc".to_string())
    }

    #[test]
    fn renders_markdown_inline_formatting() {
        let html = render_markdown("You can sum _numbers_ with [plus](https://example.com)");

        assert_eq!(
            html,
            "<p>You can sum <em>numbers</em> with <a href=\"https://example.com\">plus</a></p>\n"
        );
        assert_eq!(render_markdown("  "), "");
    }

    #[test]
    fn rows_wrap_segments_between_description_and_transcript() {
        let templates = TemplateEngine::new().unwrap();
        let highlighter = RegexHighlighter::new().unwrap();
        let theme = Theme::default();
        let renderer = PageRenderer::new(&templates, &highlighter, &theme, "javascript", "Examples");
        let example = example("// Strings are text\n\n// Join them\nconst s = a + b\n");

        let rows = renderer.rows(&example, "<pre>out</pre>").unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].markdown, "<p>Strings are text</p>\n");
        assert_eq!(rows[0].code_block, "");
        // Documentation-only segment has no code block.
        assert_eq!(rows[1].code_block, "");
        assert_eq!(rows[2].markdown, "<p>Join them</p>\n");
        assert!(rows[2].code_block.contains(r#"<span class="k">const</span>"#));
        assert_eq!(
            rows[3],
            Row {
                markdown: String::new(),
                code_block: "<pre>out</pre>".to_string(),
            }
        );
    }

    #[test]
    fn unknown_language_is_highlight_error() {
        let templates = TemplateEngine::new().unwrap();
        let highlighter = RegexHighlighter::new().unwrap();
        let theme = Theme::default();
        let renderer = PageRenderer::new(&templates, &highlighter, &theme, "cobol", "Examples");

        let err = renderer.rows(&example("x()\n"), "").unwrap_err();

        assert!(matches!(err, BuildError::Highlight(_)));
    }

    #[test]
    fn renders_full_page_with_navigation() {
        let templates = TemplateEngine::new().unwrap();
        let highlighter = RegexHighlighter::new().unwrap();
        let theme = Theme::default();
        let renderer = PageRenderer::new(&templates, &highlighter, &theme, "javascript", "Examples");
        let example = example("// Strings\nlet s = 'x'\n");

        let transcript = renderer
            .highlight_transcript("$ run strings\nx\n")
            .unwrap();
        let html = renderer.render_example(&example, &transcript).unwrap();

        assert!(html.contains("<h1>Strings</h1>"));
        assert!(html.contains(r#"<span class="gp">$ run strings</span>"#));
        assert!(html.contains(r#"href="numbers.html""#));
        assert!(!html.contains(r#"class="previous""#));
    }

    #[test]
    fn index_entry_uses_display_name() {
        let entry = example("// Working with text\nx()\n").index_entry();

        assert_eq!(
            entry,
            IndexEntry {
                id: "strings".to_string(),
                name: "Strings".to_string(),
                description: "Working with text".to_string(),
            }
        );
    }
}
