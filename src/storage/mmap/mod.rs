//! Read-only memory-mapped artifacts with validated rkyv access.

pub mod error;

pub use error::{MmapError, MmapResult};

use std::fs::File;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use memmap2::Mmap;
use rkyv::Portable;
use rkyv::api::high::{HighValidator, access};
use rkyv::bytecheck::CheckBytes;
use rkyv::rancor::Error as RkyvError;

pub const RKYV_ALIGNMENT: usize = 16;

/// Cheaply clonable read-only mapping of one file.
#[derive(Clone)]
pub struct MmapFileHandle {
    inner: Arc<Mmap>,
    path: Arc<PathBuf>,
}

impl std::fmt::Debug for MmapFileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MmapFileHandle")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}

impl MmapFileHandle {
    pub fn open<P: AsRef<Path>>(path: P) -> MmapResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        if file.metadata()?.len() == 0 {
            return Err(MmapError::EmptyFile);
        }

        // SAFETY: artifacts are only ever replaced by rename, never written in place,
        // so the mapped inode stays immutable for the lifetime of the mapping.
        let mmap = unsafe { Mmap::map(&file)? };

        Ok(Self {
            inner: Arc::new(mmap),
            path: Arc::new(path.to_path_buf()),
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        self.inner.deref()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates the mapped bytes as an archived `T` and returns a zero-copy view.
    pub fn access_archived<T>(&self) -> MmapResult<&T>
    where
        T: Portable + for<'a> CheckBytes<HighValidator<'a, RkyvError>>,
    {
        let data = self.as_slice();

        if !(data.as_ptr() as usize).is_multiple_of(RKYV_ALIGNMENT) {
            return Err(MmapError::AlignmentError {
                alignment: RKYV_ALIGNMENT,
            });
        }

        access::<T, RkyvError>(data).map_err(|e| MmapError::ValidationFailed(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rkyv::{Archive, Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Archive, Serialize, Deserialize, Debug, PartialEq)]
    struct Sample {
        id: u32,
        label: String,
    }

    #[test]
    fn test_open_and_access_archived() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.rkyv");
        let sample = Sample {
            id: 7,
            label: "seven".to_string(),
        };
        let bytes = rkyv::to_bytes::<RkyvError>(&sample).unwrap();
        std::fs::write(&path, &bytes).unwrap();

        let handle = MmapFileHandle::open(&path).unwrap();
        assert_eq!(handle.len(), bytes.len());
        assert_eq!(handle.path(), path.as_path());

        let archived = handle.access_archived::<ArchivedSample>().unwrap();
        assert_eq!(archived.id.to_native(), 7);
        assert_eq!(archived.label.as_str(), "seven");
    }

    #[test]
    fn test_open_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.rkyv");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            MmapFileHandle::open(&path),
            Err(MmapError::EmptyFile)
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            MmapFileHandle::open(dir.path().join("missing")),
            Err(MmapError::Io(_))
        ));
    }

    #[test]
    fn test_access_garbage_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.rkyv");
        std::fs::write(&path, [0xFFu8; 64]).unwrap();

        let handle = MmapFileHandle::open(&path).unwrap();
        assert!(matches!(
            handle.access_archived::<ArchivedSample>(),
            Err(MmapError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_clone_shares_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shared.bin");
        std::fs::write(&path, b"shared bytes").unwrap();

        let handle = MmapFileHandle::open(&path).unwrap();
        let clone = handle.clone();
        assert_eq!(handle.as_slice().as_ptr(), clone.as_slice().as_ptr());
        assert!(!clone.is_empty());
    }
}
