//! Crash-safe file replacement.
//!
//! Bytes are written to a temp file in the destination directory, fsynced, and then
//! renamed over the destination. Readers see either the old file or the new one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::error::StorageError;

/// Stages several files and publishes them together.
///
/// Nothing is visible at the destination paths until [`commit`](Self::commit). Staged
/// temp files that are never committed are removed on drop.
#[derive(Debug, Default)]
pub struct ArtifactWriter {
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl ArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `bytes` to a durable temp file next to `path`.
    pub fn stage(&mut self, path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
        let dir = parent_dir(path)?;
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;

        let io_err = |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        temp.write_all(bytes).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;

        debug!(path = %path.display(), bytes = bytes.len(), "Staged artifact");
        self.staged.push((temp, path.to_path_buf()));
        Ok(())
    }

    /// Number of staged files.
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Renames every staged file onto its destination, in staging order.
    pub fn commit(self) -> Result<(), StorageError> {
        for (temp, path) in self.staged {
            temp.persist(&path)
                .map_err(|e| StorageError::PublishFailed {
                    path: path.clone(),
                    reason: e.error.to_string(),
                })?;
        }
        Ok(())
    }
}

/// Atomically replaces `path` with `bytes`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut writer = ArtifactWriter::new();
    writer.stage(path, bytes)?;
    writer.commit()
}

fn parent_dir(path: &Path) -> Result<PathBuf, StorageError> {
    if path.file_name().is_none() {
        return Err(StorageError::NoParent {
            path: path.to_path_buf(),
        });
    }

    Ok(match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    })
}
