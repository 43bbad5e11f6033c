//! Durable storage abstraction for the Showroom client cache.
//!
//! This crate provides the key/value persistence boundary the state store
//! writes through:
//! - [`FileStorage`]: one file per key under a base directory, the client
//!   analogue of a browser's localStorage
//! - [`MemoryStorage`]: in-memory map for tests and ephemeral sessions
//!
//! This is the sole boundary where I/O faults surface. Every operation
//! returns an explicit [`StorageResult`]; callers above this crate treat
//! `Err` as "degrade to defaults" and never propagate it further.

mod file;
mod keys;
mod memory;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use traits::StateStorage;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Platform/path resolution error
    #[error("Platform storage error: {0}")]
    Platform(String),

    /// Key not found
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create the default storage implementation: file-backed under the
/// standard state directory (`~/.showroom/state`).
pub fn create_storage() -> StorageResult<Box<dyn StateStorage>> {
    let paths = client_config_and_utils::Paths::new()
        .map_err(|e| StorageError::Platform(e.to_string()))?;
    Ok(Box::new(FileStorage::new(paths.state_dir())))
}
