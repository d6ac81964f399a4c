//! Template engine for rendering example and index pages.

use std::path::Path;

use minijinja::{context, path_loader, Environment};

/// Name of the example page template.
pub const EXAMPLE_TEMPLATE: &str = "example.html";

/// Name of the index page template.
pub const INDEX_TEMPLATE: &str = "index.html";

/// Built-in templates as `(name, source)` pairs.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    (EXAMPLE_TEMPLATE, EXAMPLE_PAGE_TEMPLATE),
    (INDEX_TEMPLATE, INDEX_PAGE_TEMPLATE),
];

/// One documentation/code row of an example page.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Row {
    /// Documentation rendered to HTML
    pub markdown: String,
    /// Highlighted code or transcript markup
    pub code_block: String,
}

/// Context for rendering an example page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExampleContext {
    pub site_title: String,
    pub name: String,
    pub id: String,
    pub description: String,
    pub previous_id: Option<String>,
    pub next_id: Option<String>,
    pub rows: Vec<Row>,
}

/// An example listed on the index page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IndexEntry {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Self { env })
    }

    /// Create a template engine preferring templates found in `dir`.
    ///
    /// Any built-in name without a file in `dir` keeps its built-in source.
    pub fn with_dir(dir: &Path) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir));

        for &(name, source) in BUILTIN_TEMPLATES {
            let path = dir.join(name);
            if path.is_file() {
                tracing::debug!("Using template {}", path.display());
                continue;
            }
            env.add_template(name, source)?;
        }

        Ok(Self { env })
    }

    /// Render an example page.
    pub fn render_example(&self, page: &ExampleContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(EXAMPLE_TEMPLATE)?;

        tmpl.render(context! {
            site_title => &page.site_title,
            title => &page.name,
            name => &page.name,
            id => &page.id,
            description => &page.description,
            previous_id => &page.previous_id,
            next_id => &page.next_id,
            rows => &page.rows,
        })
    }

    /// Render the index page listing `examples` in order.
    pub fn render_index(
        &self,
        site_title: &str,
        examples: &[IndexEntry],
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(INDEX_TEMPLATE)?;

        tmpl.render(context! {
            site_title => site_title,
            title => site_title,
            examples => examples,
        })
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title != site_title %}{{ title }} - {% endif %}{{ site_title }}</title>
  <link rel="stylesheet" href="site.css">
  <link rel="stylesheet" href="code.css">
</head>
<body>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
</body>
</html>"##;

const EXAMPLE_PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<header class="example-header">
  <a href="index.html" class="site-title">{{ site_title }}</a>
  <h1>{{ name }}</h1>
</header>
<table class="example">
{% for row in rows %}
  <tr>
    <td class="docs">{{ row.markdown | safe }}</td>
    <td class="code">{{ row.code_block | safe }}</td>
  </tr>
{% endfor %}
</table>
<nav class="pager">
  {% if previous_id %}<a class="previous" href="{{ previous_id }}.html">&larr; {{ previous_id }}</a>{% endif %}
  {% if next_id %}<a class="next" href="{{ next_id }}.html">{{ next_id }} &rarr;</a>{% endif %}
</nav>
{% endblock %}"##;

const INDEX_PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<header class="example-header">
  <h1>{{ site_title }}</h1>
</header>
<ul class="example-list">
{% for example in examples %}
  <li>
    <a href="{{ example.id }}.html">{{ example.name }}</a>
    {% if example.description %}<span class="description">{{ example.description }}</span>{% endif %}
  </li>
{% endfor %}
</ul>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn example_context() -> ExampleContext {
        ExampleContext {
            site_title: "Examples".to_string(),
            name: "Strings".to_string(),
            id: "strings".to_string(),
            description: "Working with strings".to_string(),
            previous_id: Some("numbers".to_string()),
            next_id: None,
            rows: vec![
                Row {
                    markdown: "<p>Concatenate</p>".to_string(),
                    code_block: "<pre>a + b</pre>".to_string(),
                },
                Row {
                    markdown: String::new(),
                    code_block: "<pre>$ run strings</pre>".to_string(),
                },
            ],
        }
    }

    #[test]
    fn renders_example_page() {
        let engine = TemplateEngine::new().unwrap();

        let html = engine.render_example(&example_context()).unwrap();

        assert!(html.contains("<title>Strings - Examples</title>"));
        assert!(html.contains("<h1>Strings</h1>"));
        assert!(html.contains(r#"<td class="docs"><p>Concatenate</p></td>"#));
        assert!(html.contains(r#"<td class="code"><pre>$ run strings</pre></td>"#));
        assert!(html.contains(r#"href="numbers.html""#));
        assert!(!html.contains(r#"class="next""#));
    }

    #[test]
    fn escapes_plain_values() {
        let engine = TemplateEngine::new().unwrap();
        let mut page = example_context();
        page.name = "<b>Bold</b>".to_string();

        let html = engine.render_example(&page).unwrap();

        assert!(html.contains("&lt;b&gt;Bold&lt;&#x2f;b&gt;"));
        assert!(!html.contains("<b>Bold"));
    }

    #[test]
    fn renders_index_in_order() {
        let engine = TemplateEngine::new().unwrap();
        let examples = vec![
            IndexEntry {
                id: "strings".to_string(),
                name: "Strings".to_string(),
                description: "Working with strings".to_string(),
            },
            IndexEntry {
                id: "numbers".to_string(),
                name: "Numbers".to_string(),
                description: String::new(),
            },
        ];

        let html = engine.render_index("JS by Example", &examples).unwrap();

        assert!(html.contains("<title>JS by Example</title>"));
        let strings = html.find(r#"href="strings.html""#).unwrap();
        let numbers = html.find(r#"href="numbers.html""#).unwrap();
        assert!(strings < numbers);
        assert!(html.contains("Working with strings"));
    }

    #[test]
    fn directory_templates_override_builtins() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("index.html"),
            "{% for example in examples %}[{{ example.id }}]{% endfor %}",
        )
        .unwrap();

        let engine = TemplateEngine::with_dir(temp.path()).unwrap();
        let examples = vec![IndexEntry {
            id: "hello".to_string(),
            name: "Hello".to_string(),
            description: String::new(),
        }];

        assert_eq!(engine.render_index("Site", &examples).unwrap(), "[hello]");

        // Not overridden: built-in example page still renders.
        let html = engine.render_example(&example_context()).unwrap();
        assert!(html.contains("<h1>Strings</h1>"));
    }

    #[test]
    fn overridden_base_applies_to_builtin_pages() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("base.html"),
            "<custom>{% block content %}{% endblock %}</custom>",
        )
        .unwrap();

        let engine = TemplateEngine::with_dir(temp.path()).unwrap();
        let html = engine.render_example(&example_context()).unwrap();

        assert!(html.starts_with("<custom>"));
        assert!(html.ends_with("</custom>"));
    }

    #[test]
    fn broken_override_is_an_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("example.html"), "{% for row in rows %}").unwrap();

        let engine = TemplateEngine::with_dir(temp.path()).unwrap();

        assert!(engine.render_example(&example_context()).is_err());
    }
}
