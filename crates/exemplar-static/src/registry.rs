//! Example registry: identity, ordering and navigation links.
//!
//! Examples are the subdirectories of the examples root. Their order is the
//! order the filesystem lists them in, or the order of an explicit manifest
//! file with one id per line.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BuildError;

/// One example discovered in the examples root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleEntry {
    /// Directory name, unique within a build
    pub id: String,

    /// Human-readable label derived from the id
    pub display_name: String,

    /// Example directory (also holds the cache sidecars)
    pub dir: PathBuf,

    /// Source file `{dir}/{id}.{extension}`
    pub source_path: PathBuf,

    /// Id of the example before this one
    pub previous_id: Option<String>,

    /// Id of the example after this one
    pub next_id: Option<String>,
}

impl ExampleEntry {
    /// Path of a sidecar file `{dir}/{id}.{extension}`.
    pub fn sidecar(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.id, extension))
    }
}

/// Enumerates the examples of a build.
#[derive(Debug, Clone)]
pub struct ExampleRegistry {
    examples_dir: PathBuf,
    manifest: Option<PathBuf>,
    extension: String,
}

impl ExampleRegistry {
    /// Create a registry over `examples_dir` for sources with `extension`.
    pub fn new(examples_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            examples_dir: examples_dir.into(),
            manifest: None,
            extension: extension.into(),
        }
    }

    /// Order examples by the ids listed in `manifest`.
    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    /// List the examples in build order with their navigation links.
    pub fn enumerate(&self) -> Result<Vec<ExampleEntry>, BuildError> {
        if !self.examples_dir.is_dir() {
            return Err(BuildError::Config(format!(
                "Examples directory not found: {}",
                self.examples_dir.display()
            )));
        }

        let dir_ids = self.directory_ids()?;

        let ids = match &self.manifest {
            Some(manifest) => {
                let ids = read_manifest(manifest)?;
                if ids.len() != dir_ids.len() {
                    return Err(BuildError::Config(format!(
                        "Manifest {} lists {} examples but {} contains {}",
                        manifest.display(),
                        ids.len(),
                        self.examples_dir.display(),
                        dir_ids.len()
                    )));
                }
                ids
            }
            None => dir_ids,
        };

        tracing::debug!(
            "Found {} examples in {}",
            ids.len(),
            self.examples_dir.display()
        );

        Ok(ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let dir = self.examples_dir.join(id);
                ExampleEntry {
                    id: id.clone(),
                    display_name: display_name(id),
                    source_path: dir.join(format!("{}.{}", id, self.extension)),
                    dir,
                    previous_id: index.checked_sub(1).map(|i| ids[i].clone()),
                    next_id: ids.get(index + 1).cloned(),
                }
            })
            .collect())
    }

    /// Subdirectory names in the order the filesystem yields them.
    fn directory_ids(&self) -> Result<Vec<String>, BuildError> {
        let mut ids = Vec::new();

        for entry in WalkDir::new(&self.examples_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| BuildError::Io {
                path: self.examples_dir.clone(),
                source: e.into(),
            })?;

            if !entry.file_type().is_dir() {
                tracing::warn!("Skipping non-directory {}", entry.path().display());
                continue;
            }

            let id = entry.file_name().to_str().ok_or_else(|| {
                BuildError::Config(format!(
                    "Example directory name is not valid UTF-8: {}",
                    entry.path().display()
                ))
            })?;
            ids.push(id.to_string());
        }

        Ok(ids)
    }
}

/// Read manifest ids, one per line, ignoring trailing blank lines.
fn read_manifest(path: &Path) -> Result<Vec<String>, BuildError> {
    let content = fs::read_to_string(path).map_err(BuildError::io(path))?;

    let mut ids: Vec<String> = content.lines().map(|l| l.trim().to_string()).collect();
    while ids.last().is_some_and(|id| id.is_empty()) {
        ids.pop();
    }

    Ok(ids)
}

/// Upper-case the first character of an id and lower-case the rest.
pub fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
