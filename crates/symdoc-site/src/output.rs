//! Output filesystem collaborator.
//!
//! The orchestrator only needs a handful of operations; they are behind a
//! trait so page generation can run against a fake in tests. [`FsOutput`]
//! is the `std::fs` backed default.

use std::path::{Path, PathBuf};

/// Filesystem error with path context.
#[derive(Debug, thiserror::Error)]
#[error("I/O error (path: {})", path.display())]
pub struct OutputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl OutputError {
    fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Filesystem operations used during page generation.
pub trait OutputFs {
    /// Read a text file.
    fn read(&self, path: &Path) -> Result<String, OutputError>;

    /// Write a text file, replacing any existing content.
    fn write(&self, path: &Path, content: &str) -> Result<(), OutputError>;

    /// Create a directory and all missing parents.
    fn mkdir_all(&self, path: &Path) -> Result<(), OutputError>;

    /// List files under a directory, descending at most `depth` levels.
    fn list(&self, dir: &Path, depth: usize) -> Result<Vec<PathBuf>, OutputError>;

    /// Copy one file.
    fn copy(&self, from: &Path, to: &Path) -> Result<(), OutputError>;
}

/// `std::fs` backed output target.
#[derive(Debug, Default)]
pub struct FsOutput;

impl OutputFs for FsOutput {
    fn read(&self, path: &Path) -> Result<String, OutputError> {
        std::fs::read_to_string(path).map_err(|e| OutputError::new(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), OutputError> {
        std::fs::write(path, content).map_err(|e| OutputError::new(path, e))
    }

    fn mkdir_all(&self, path: &Path) -> Result<(), OutputError> {
        std::fs::create_dir_all(path).map_err(|e| OutputError::new(path, e))
    }

    fn list(&self, dir: &Path, depth: usize) -> Result<Vec<PathBuf>, OutputError> {
        let mut files = Vec::new();
        list_into(dir, depth, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), OutputError> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| OutputError::new(from, e))
    }
}

fn list_into(dir: &Path, depth: usize, files: &mut Vec<PathBuf>) -> Result<(), OutputError> {
    let entries = std::fs::read_dir(dir).map_err(|e| OutputError::new(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| OutputError::new(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            if depth > 0 {
                list_into(&path, depth - 1, files)?;
            }
        } else {
            files.push(path);
        }
    }
    Ok(())
}
