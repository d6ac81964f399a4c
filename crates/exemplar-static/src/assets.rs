//! Stylesheet generation and minification.

use exemplar_highlight::{HighlightError, Highlighter, Theme};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the layout stylesheet.
    pub fn site_css() -> String {
        SITE_CSS.to_string()
    }

    /// Generate the code stylesheet for `theme`.
    pub fn code_css(highlighter: &dyn Highlighter, theme: &Theme) -> Result<String, HighlightError> {
        highlighter.stylesheet(theme)
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Minify when `minify` is set, keeping the input if lightningcss rejects it.
    pub fn finish_css(name: &str, css: String, minify: bool) -> String {
        if !minify {
            return css;
        }

        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Failed to minify {}: {}", name, e);
                css
            }
        }
    }
}

const SITE_CSS: &str = r#"/* Example pages: documentation beside code */

:root {
  --docs-width: 420px;
  --content-max-width: 1200px;
  --font-mono: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
  --muted: #6b7280;
  --border: #e5e7eb;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.6;
  color: #111827;
}

.main {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

.example-header h1 {
  margin: 0.5rem 0 1.5rem;
  font-size: 2rem;
}

.site-title {
  color: var(--muted);
  text-decoration: none;
}

table.example {
  width: 100%;
  border-collapse: collapse;
}

table.example td {
  vertical-align: top;
  padding: 0 1rem 0.75rem 0;
}

td.docs {
  width: var(--docs-width);
  font-size: 0.95rem;
}

td.docs p {
  margin: 0;
}

td.code pre {
  margin: 0;
  padding: 0.75rem 1rem;
  border-radius: 6px;
  overflow-x: auto;
  font-family: var(--font-mono);
  font-size: 0.875rem;
}

.pager {
  display: flex;
  justify-content: space-between;
  margin-top: 2rem;
  padding-top: 1rem;
  border-top: 1px solid var(--border);
}

.pager .next {
  margin-left: auto;
}

.example-list {
  list-style: none;
  padding: 0;
}

.example-list li {
  padding: 0.5rem 0;
  border-bottom: 1px solid var(--border);
}

.example-list .description {
  margin-left: 1rem;
  color: var(--muted);
}

@media (max-width: 768px) {
  table.example td {
    display: block;
    width: 100%;
  }
}
"#;
