//! Output writer trait and the filesystem implementation.
//!
//! The pipeline only ever needs two operations: make a directory (with
//! parents) and write a whole file. Paths are relative to the sink's root,
//! so the same pipeline code writes to disk in production and into a
//! recording mock in tests.
//!
//! Writes overwrite in place. Re-running the pipeline over an existing
//! output directory replaces every page and sitemap it produces and leaves
//! unrelated files alone.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Destination for generated files.
pub trait OutputSink: Sync {
    /// Create `dir` and any missing parents.
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes under a root directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl OutputSink for FsSink {
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(self.root.join(dir))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(self.root.join(path), contents)
    }
}
