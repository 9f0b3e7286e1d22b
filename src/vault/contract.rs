//! Capability contracts the sweep consumes from a vault host.
//!
//! Each trait covers one concern so callers only depend on what they use:
//! classification needs a lister and a reader, applying a plan needs a mover
//! and a deleter.

use crate::error::ApiError;
use crate::types::FileEntry;
use async_trait::async_trait;

/// Lists every file in the vault.
pub trait FileLister: Send + Sync {
    fn list_files(&self) -> Result<Vec<FileEntry>, ApiError>;
}

/// Reads the full text of a note.
#[async_trait]
pub trait ContentReader: Send + Sync {
    async fn read_text(&self, note: &FileEntry) -> Result<String, ApiError>;
}

/// Moves files inside the vault.
#[async_trait]
pub trait FileMover: Send + Sync {
    /// Whether anything occupies `path` (vault-relative).
    async fn exists(&self, path: &str) -> Result<bool, ApiError>;

    /// Move `file` to `destination` (vault-relative). Never overwrites.
    async fn rename(&self, file: &FileEntry, destination: &str) -> Result<(), ApiError>;
}

/// Removes files from the vault.
#[async_trait]
pub trait FileDeleter: Send + Sync {
    async fn trash(&self, file: &FileEntry) -> Result<(), ApiError>;
}
