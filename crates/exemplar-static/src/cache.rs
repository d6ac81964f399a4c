//! Content-addressed execution cache.
//!
//! Each example keeps two sidecar files next to its source:
//!
//! ```text
//! examples/strings/
//! +-- strings.js            # source
//! +-- strings.hash          # hex SHA-256 of prompt line + source bytes
//! +-- strings.transcript    # prompt line + captured output
//! ```
//!
//! The digest is written only after the transcript, and removed before the
//! runtime is invoked, so a digest on disk always belongs to a complete
//! transcript. A digest without its transcript is treated as a miss.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::BuildError;
use crate::registry::ExampleEntry;
use crate::runner::Runner;

/// Extension of the digest sidecar.
pub const HASH_EXT: &str = "hash";

/// Extension of the transcript sidecar.
pub const TRANSCRIPT_EXT: &str = "transcript";

/// How a transcript was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Persisted digest matched; no execution
    Hit,
    /// No persisted digest
    Fresh,
    /// Persisted digest differed from the current one
    Stale,
    /// Digest matched but the transcript file was missing
    Incomplete,
}

impl CacheStatus {
    /// Check if the example had to be executed.
    pub fn executed(&self) -> bool {
        *self != Self::Hit
    }
}

/// An up-to-date transcript for one example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Prompt line followed by the captured output
    pub text: String,

    /// Digest persisted for this transcript
    pub digest: String,

    pub status: CacheStatus,
}

/// Prompt line heading every transcript.
pub fn prompt(id: &str) -> String {
    format!("$ run {}\n", id)
}

/// Hex SHA-256 over the prompt line followed by the source bytes.
pub fn compute_digest(id: &str, source: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt(id).as_bytes());
    hasher.update(source);
    hex::encode(hasher.finalize())
}

/// Decides per example whether the persisted transcript can be reused.
pub struct ExecutionCache<'r> {
    runner: &'r dyn Runner,
}

impl<'r> ExecutionCache<'r> {
    /// Create a cache that executes misses with `runner`.
    pub fn new(runner: &'r dyn Runner) -> Self {
        Self { runner }
    }

    /// Return the transcript for `entry`, executing the example only when its
    /// persisted digest does not match `source`.
    pub fn ensure_fresh(
        &self,
        entry: &ExampleEntry,
        source: &[u8],
    ) -> Result<Transcript, BuildError> {
        let digest = compute_digest(&entry.id, source);
        let hash_path = entry.sidecar(HASH_EXT);
        let transcript_path = entry.sidecar(TRANSCRIPT_EXT);

        let status = match read_optional(&hash_path)? {
            None => CacheStatus::Fresh,
            Some(previous) if previous.trim() == digest => match read_optional(&transcript_path)? {
                Some(text) => {
                    tracing::info!("{}: cache hit, skipping execution", entry.id);
                    return Ok(Transcript {
                        text,
                        digest,
                        status: CacheStatus::Hit,
                    });
                }
                None => CacheStatus::Incomplete,
            },
            Some(_) => CacheStatus::Stale,
        };

        match status {
            CacheStatus::Fresh => tracing::info!("{}: creating fresh cache entry", entry.id),
            CacheStatus::Stale => tracing::info!("{}: cache miss: digest changed", entry.id),
            CacheStatus::Incomplete => {
                tracing::warn!("{}: transcript missing for cached digest, re-running", entry.id)
            }
            CacheStatus::Hit => {}
        }

        remove_if_exists(&hash_path)?;

        let output = self.runner.run(&entry.source_path)?;
        let mut text = prompt(&entry.id);
        text.push_str(&String::from_utf8_lossy(&output));

        fs::write(&transcript_path, &text).map_err(BuildError::io(&transcript_path))?;
        fs::write(&hash_path, &digest).map_err(BuildError::io(&hash_path))?;

        Ok(Transcript {
            text,
            digest,
            status,
        })
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, BuildError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(BuildError::io(path)(e)),
    }
}

fn remove_if_exists(path: &Path) -> Result<(), BuildError> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(BuildError::io(path)(e)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ExampleRegistry;
    use crate::runner::fake::FakeRunner;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    fn make_entry(source: &str) -> (TempDir, ExampleEntry) {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("strings");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("strings.js"), source).unwrap();

        let entry = ExampleRegistry::new(temp.path(), "js")
            .enumerate()
            .unwrap()
            .remove(0);
        (temp, entry)
    }

    fn ensure(runner: &FakeRunner, entry: &ExampleEntry) -> Transcript {
        let source = fs::read(&entry.source_path).unwrap();
        ExecutionCache::new(runner).ensure_fresh(entry, &source).unwrap()
    }

    #[test]
    fn digest_covers_prompt_and_source() {
        let a = compute_digest("strings", b"x()");
        let b = compute_digest("numbers", b"x()");
        let c = compute_digest("strings", b"y()");

        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, compute_digest("strings", b"x()"));
    }

    #[test]
    fn first_run_executes_and_persists() {
        let (_temp, entry) = make_entry("a()\nb()\n");
        let runner = FakeRunner::new();

        let transcript = ensure(&runner, &entry);

        assert_eq!(transcript.status, CacheStatus::Fresh);
        assert_eq!(transcript.text, "$ run strings\nran 2 lines\n");
        assert_eq!(runner.call_count(), 1);
        assert_eq!(
            fs::read_to_string(entry.sidecar(TRANSCRIPT_EXT)).unwrap(),
            transcript.text
        );
        assert_eq!(
            fs::read_to_string(entry.sidecar(HASH_EXT)).unwrap(),
            transcript.digest
        );
    }

    #[test]
    fn unchanged_source_is_a_hit() {
        let (_temp, entry) = make_entry("a()\n");
        let runner = FakeRunner::new();
        let first = ensure(&runner, &entry);
        let hash_before = fs::read(entry.sidecar(HASH_EXT)).unwrap();

        let second = ensure(&runner, &entry);

        assert_eq!(second.status, CacheStatus::Hit);
        assert_eq!(second.text, first.text);
        assert_eq!(runner.call_count(), 1);
        assert_eq!(fs::read(entry.sidecar(HASH_EXT)).unwrap(), hash_before);
    }

    #[test]
    fn changed_source_is_stale() {
        let (_temp, entry) = make_entry("a()\n");
        let runner = FakeRunner::new();
        ensure(&runner, &entry);
        fs::write(&entry.source_path, "a()\nb()\nc()\n").unwrap();

        let transcript = ensure(&runner, &entry);

        assert_eq!(transcript.status, CacheStatus::Stale);
        assert_eq!(transcript.text, "$ run strings\nran 3 lines\n");
        assert_eq!(runner.call_count(), 2);
        assert_eq!(
            fs::read_to_string(entry.sidecar(HASH_EXT)).unwrap(),
            compute_digest("strings", b"a()\nb()\nc()\n")
        );
    }

    #[test]
    fn digest_without_transcript_is_a_miss() {
        let (_temp, entry) = make_entry("a()\n");
        let runner = FakeRunner::new();
        ensure(&runner, &entry);
        fs::remove_file(entry.sidecar(TRANSCRIPT_EXT)).unwrap();

        let transcript = ensure(&runner, &entry);

        assert_eq!(transcript.status, CacheStatus::Incomplete);
        assert_eq!(runner.call_count(), 2);
        assert!(entry.sidecar(TRANSCRIPT_EXT).exists());
        assert!(entry.sidecar(HASH_EXT).exists());
    }

    #[test]
    fn failed_run_leaves_no_digest() {
        let (_temp, entry) = make_entry("a()\n");
        ensure(&FakeRunner::new(), &entry);
        fs::write(&entry.source_path, "changed()\n").unwrap();
        let source = fs::read(&entry.source_path).unwrap();

        let failing = FakeRunner::failing();
        let err = ExecutionCache::new(&failing)
            .ensure_fresh(&entry, &source)
            .unwrap_err();

        assert!(matches!(err, BuildError::Execution(_)));
        assert!(!entry.sidecar(HASH_EXT).exists());
    }

    #[test]
    fn hand_edited_digest_with_whitespace_still_hits() {
        let (_temp, entry) = make_entry("a()\n");
        let runner = FakeRunner::new();
        let first = ensure(&runner, &entry);
        fs::write(entry.sidecar(HASH_EXT), format!("{}\n", first.digest)).unwrap();

        let second = ensure(&runner, &entry);

        assert_eq!(second.status, CacheStatus::Hit);
        assert_eq!(runner.call_count(), 1);
    }
}
