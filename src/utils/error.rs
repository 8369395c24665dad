//! Error types for membench

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Partition error: {0}")]
    Partition(#[from] PartitionError),

    #[error("Compression error: {0}")]
    Compress(#[from] CompressError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Worker error: {0}")]
    Worker(String),
}

/// Partitioning errors
///
/// Partition requests are validated before any worker is launched; a bad
/// request fails fast and never reaches the division.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Worker count must be at least 1")]
    ZeroWorkers,
}

/// Compression pipeline errors
#[derive(Error, Debug)]
pub enum CompressError {
    #[error("Quality {0} out of range (expected 1-100)")]
    InvalidQuality(u32),

    #[error("Failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Encoder failed: {0}")]
    Encode(io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
