//! Board persistence.

mod file;
mod format;

pub use file::{FileStorage, BOARD_EXTENSION, DEFAULT_BOARD_DIR};
pub use format::{file_to_store, store_to_file, BoardFile, ObjectRecord};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("board not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
