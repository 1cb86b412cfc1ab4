//! Durable artifact primitives (atomic writes and mmap reads).

pub mod atomic;
pub mod error;
pub mod mmap;

pub use atomic::{ArtifactWriter, write_atomic};
pub use error::StorageError;
pub use mmap::{MmapError, MmapFileHandle};
