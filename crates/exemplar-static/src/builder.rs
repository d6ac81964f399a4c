//! Static site builder.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use exemplar_highlight::{Highlighter, RegexHighlighter, Theme};
use exemplar_source::ExampleSource;

use crate::assets::AssetPipeline;
use crate::cache::{CacheStatus, ExecutionCache};
use crate::error::BuildError;
use crate::page::{Example, PageRenderer};
use crate::registry::{ExampleEntry, ExampleRegistry};
use crate::runner::{CommandRunner, Runner};
use crate::templates::TemplateEngine;

/// Configuration for building a site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Examples root, one subdirectory per example
    pub examples_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Directory with templates overriding the built-in ones
    pub templates_dir: Option<PathBuf>,

    /// File listing example ids in build order, one per line
    pub manifest: Option<PathBuf>,

    /// Source file extension, without the dot
    pub extension: String,

    /// Highlighting language of the sources
    pub language: String,

    /// Leading source lines reserved for the description
    pub header_lines: usize,

    /// Highlighting theme name
    pub theme: String,

    /// Minify CSS output
    pub minify: bool,

    /// Site title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            examples_dir: PathBuf::from("examples"),
            output_dir: PathBuf::from("public"),
            templates_dir: None,
            manifest: None,
            extension: "js".to_string(),
            language: "javascript".to_string(),
            header_lines: 0,
            theme: "tokyonight-night".to_string(),
            minify: true,
            title: "Examples".to_string(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of example pages generated
    pub pages: usize,

    /// Number of examples the runtime was invoked for
    pub executed: usize,

    /// Number of examples served from the cache
    pub cached: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    runner: Box<dyn Runner>,
    highlighter: Box<dyn Highlighter>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a builder running examples with the default runtime command.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let templates = match &config.templates_dir {
            Some(dir) if dir.is_dir() => {
                tracing::info!("Loading templates from {}", dir.display());
                TemplateEngine::with_dir(dir)?
            }
            Some(dir) => {
                return Err(BuildError::Config(format!(
                    "Templates directory not found: {}",
                    dir.display()
                )))
            }
            None => TemplateEngine::new()?,
        };

        Ok(Self {
            config,
            runner: Box::new(CommandRunner::default()),
            highlighter: Box::new(RegexHighlighter::new()?),
            templates,
        })
    }

    /// Use `runner` to execute examples.
    pub fn with_runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Use `highlighter` for code, transcripts and the code stylesheet.
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Build the site.
    ///
    /// Configuration problems (unknown theme, manifest mismatch, missing
    /// examples root) are reported before anything is written.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let theme = Theme::by_name(&self.config.theme)?;
        let entries = self.registry().enumerate()?;

        fs::create_dir_all(&self.config.output_dir)
            .map_err(BuildError::io(&self.config.output_dir))?;

        self.generate_assets(&theme)?;

        let cache = ExecutionCache::new(self.runner.as_ref());
        let renderer = PageRenderer::new(
            &self.templates,
            self.highlighter.as_ref(),
            &theme,
            &self.config.language,
            &self.config.title,
        );

        let mut index = Vec::with_capacity(entries.len());
        let mut executed = 0;

        for entry in &entries {
            let (example, status) = self.build_example(entry, &cache, &renderer)?;
            if status.executed() {
                executed += 1;
            }
            index.push(example.index_entry());
        }

        let index_path = self.config.output_dir.join("index.html");
        let html = renderer.render_index(&index)?;
        fs::write(&index_path, html).map_err(BuildError::io(&index_path))?;

        let duration = start.elapsed();

        tracing::info!(
            "Built {} examples ({} executed, {} cached)",
            entries.len(),
            executed,
            entries.len() - executed
        );

        Ok(BuildResult {
            pages: entries.len(),
            executed,
            cached: entries.len() - executed,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn registry(&self) -> ExampleRegistry {
        let registry = ExampleRegistry::new(&self.config.examples_dir, &self.config.extension);
        match &self.config.manifest {
            Some(manifest) => registry.with_manifest(manifest),
            None => registry,
        }
    }

    /// Parse, run (or reuse) and render one example.
    fn build_example(
        &self,
        entry: &ExampleEntry,
        cache: &ExecutionCache<'_>,
        renderer: &PageRenderer<'_>,
    ) -> Result<(Example, CacheStatus), BuildError> {
        let bytes = fs::read(&entry.source_path).map_err(BuildError::io(&entry.source_path))?;
        let text = String::from_utf8_lossy(&bytes);
        let source = ExampleSource::parse(&text, self.config.header_lines);

        let transcript = cache.ensure_fresh(entry, &bytes)?;
        let example = Example::new(entry, source, transcript.digest);

        let transcript_markup = renderer.highlight_transcript(&transcript.text)?;
        let html = renderer.render_example(&example, &transcript_markup)?;

        let output_path = self.config.output_dir.join(format!("{}.html", entry.id));
        fs::write(&output_path, html).map_err(BuildError::io(&output_path))?;

        tracing::debug!("Wrote {}", output_path.display());

        Ok((example, transcript.status))
    }

    /// Write the layout and code stylesheets.
    fn generate_assets(&self, theme: &Theme) -> Result<(), BuildError> {
        let site_css =
            AssetPipeline::finish_css("site.css", AssetPipeline::site_css(), self.config.minify);
        let code_css = AssetPipeline::finish_css(
            "code.css",
            AssetPipeline::code_css(self.highlighter.as_ref(), theme)?,
            self.config.minify,
        );

        for (name, css) in [("site.css", site_css), ("code.css", code_css)] {
            let path = self.config.output_dir.join(name);
            fs::write(&path, css).map_err(BuildError::io(&path))?;
        }

        Ok(())
    }
}
