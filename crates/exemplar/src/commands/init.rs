//! Scaffold a new examples project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use exemplar_static::templates::BUILTIN_TEMPLATES;

/// Run the init command in the current directory.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing exemplar...");

    scaffold(Path::new("."), config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'exemplar build' to build the site.");

    Ok(())
}

/// Write the config, a sample example and the templates under `root`.
/// Existing files are kept unless `overwrite` is set.
fn scaffold(root: &Path, config_path: &Path, overwrite: bool) -> Result<()> {
    write_file(&root.join(config_path), DEFAULT_CONFIG, overwrite)?;

    let hello_dir = root.join("examples").join("hello");
    fs::create_dir_all(&hello_dir).context("Failed to create examples directory")?;
    write_file(&hello_dir.join("hello.js"), DEFAULT_EXAMPLE, overwrite)?;

    let templates_dir = root.join("templates");
    fs::create_dir_all(&templates_dir).context("Failed to create templates directory")?;
    for &(name, source) in BUILTIN_TEMPLATES {
        write_file(&templates_dir.join(name), source, overwrite)?;
    }

    Ok(())
}

fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Exemplar Configuration

[site]
# Site title
title = "Examples"

# One subdirectory per example, holding {id}/{id}.js
examples_dir = "examples"

# Output directory for the built site
output_dir = "public"

# Templates overriding the built-in pages
templates_dir = "templates"

# Explicit example order, one id per line
# manifest = "examples.txt"

[source]
extension = "js"
language = "javascript"

# Leading lines reserved for the page description
header_lines = 0

[runner]
program = "deno"
args = ["run", "--allow-read"]

[style]
# tokyonight-night or github
theme = "tokyonight-night"
minify = true
"#;

const DEFAULT_EXAMPLE: &str = r#"// Printing is the smallest complete program

// `console.log` writes a line to standard output
console.log("hello world")

// Standard error is captured into the same transcript
console.error("goodbye")
"#;
