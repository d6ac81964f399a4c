//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use exemplar_static::{BuildConfig, CommandRunner, StaticBuilder};
use serde::Deserialize;

/// Configuration file structure (exemplar.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    site: SiteConfig,
    source: SourceConfig,
    runner: RunnerConfig,
    style: StyleConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SiteConfig {
    title: String,
    examples_dir: PathBuf,
    output_dir: PathBuf,
    /// Directory with template overrides
    templates_dir: Option<PathBuf>,
    /// Explicit example order, one id per line
    manifest: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Examples".to_string(),
            examples_dir: PathBuf::from("examples"),
            output_dir: PathBuf::from("public"),
            templates_dir: None,
            manifest: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SourceConfig {
    extension: String,
    language: String,
    header_lines: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: "js".to_string(),
            language: "javascript".to_string(),
            header_lines: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunnerConfig {
    program: String,
    args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "deno".to_string(),
            args: vec!["run".to_string(), "--allow-read".to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct StyleConfig {
    theme: String,
    minify: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            theme: "tokyonight-night".to_string(),
            minify: true,
        }
    }
}

impl ConfigFile {
    /// Merge CLI overrides into a builder configuration.
    fn build_config(&self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            examples_dir: self.site.examples_dir.clone(),
            output_dir: output.unwrap_or_else(|| self.site.output_dir.clone()),
            templates_dir: self.site.templates_dir.clone(),
            manifest: self.site.manifest.clone(),
            extension: self.source.extension.clone(),
            language: self.source.language.clone(),
            header_lines: self.source.header_lines,
            theme: self.style.theme.clone(),
            minify: minify.unwrap_or(self.style.minify),
            title: self.site.title.clone(),
        }
    }

    fn runner(&self) -> CommandRunner {
        CommandRunner::new(&self.runner.program, &self.runner.args)
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building examples...");

    let file_config = load_config(config_path)?;

    let builder = StaticBuilder::new(file_config.build_config(output, minify))?
        .with_runner(file_config.runner());
    let result = builder.build()?;

    tracing::info!(
        "Built {} pages ({} executed, {} cached) in {}ms",
        result.pages,
        result.executed,
        result.cached,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
