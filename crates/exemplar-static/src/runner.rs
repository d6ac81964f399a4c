//! Execution of example programs.

use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Errors that can occur while running an example.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Failed to start `{program}` for {path}: {source}")]
    Spawn {
        program: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status} while running {path}:\n{output}")]
    Failed {
        program: String,
        path: PathBuf,
        status: String,
        output: String,
    },

    #[error("Failed to capture output of {path}: {source}")]
    Capture {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Runs an example source file and returns its combined output.
pub trait Runner {
    /// Execute `source`, returning stdout and stderr as one stream.
    fn run(&self, source: &Path) -> Result<Vec<u8>, ExecutionError>;
}

/// Runs examples through an external program, e.g. `deno run --allow-read`.
///
/// The program runs inside the example's directory and receives the source
/// file name as its last argument. Stdout and stderr share one capture file so
/// their interleaving is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
}

impl CommandRunner {
    /// Create a runner invoking `program` with `args` before the source path.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new("deno", ["run", "--allow-read"])
    }
}

impl Runner for CommandRunner {
    // TODO: bound the run time; a hanging example currently blocks the build forever.
    fn run(&self, source: &Path) -> Result<Vec<u8>, ExecutionError> {
        let capture_err = |source_err| ExecutionError::Capture {
            path: source.to_path_buf(),
            source: source_err,
        };

        let mut capture = tempfile::tempfile().map_err(capture_err)?;
        let stdout = capture.try_clone().map_err(capture_err)?;
        let stderr = capture.try_clone().map_err(capture_err)?;

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);

        match (source.parent(), source.file_name()) {
            (Some(dir), Some(file)) if !dir.as_os_str().is_empty() => {
                command.current_dir(dir).arg(file);
            }
            _ => {
                command.arg(source);
            }
        }

        tracing::debug!("Running {} {:?} {}", self.program, self.args, source.display());

        let status = command.status().map_err(|e| ExecutionError::Spawn {
            program: self.program.clone(),
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut output = Vec::new();
        capture
            .seek(SeekFrom::Start(0))
            .and_then(|_| capture.read_to_end(&mut output))
            .map_err(capture_err)?;

        if !status.success() {
            return Err(ExecutionError::Failed {
                program: self.program.clone(),
                path: source.to_path_buf(),
                status: status.to_string(),
                output: String::from_utf8_lossy(&output).into_owned(),
            });
        }

        Ok(output)
    }
}
