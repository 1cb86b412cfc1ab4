use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot mmap empty file")]
    EmptyFile,

    #[error("rkyv validation failed: {0}")]
    ValidationFailed(String),

    #[error("mapped data is not aligned to {alignment} bytes")]
    AlignmentError { alignment: usize },
}

pub type MmapResult<T> = Result<T, MmapError>;
