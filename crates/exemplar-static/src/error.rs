//! Build errors.

use std::path::{Path, PathBuf};

use exemplar_highlight::HighlightError;

use crate::runner::ExecutionError;

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("Failed to render template: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Failed to highlight: {0}")]
    Highlight(#[from] HighlightError),
}

impl BuildError {
    /// Adapter for `map_err` attaching the path an I/O operation touched.
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| Self::Io { path, source }
    }
}
