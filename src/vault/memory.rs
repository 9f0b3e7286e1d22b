//! In-memory vault for tests and embedders that supply their own listing.

use crate::error::{ApiError, StorageError};
use crate::types::FileEntry;
use crate::vault::{ContentReader, FileDeleter, FileLister, FileMover};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct MemoryFile {
    path: String,
    content: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    files: Vec<MemoryFile>,
    trashed: Vec<String>,
}

/// Vault held entirely in memory. Listing order is insertion order.
#[derive(Debug, Default)]
pub struct MemoryVault {
    state: RwLock<MemoryState>,
    unreadable: HashSet<String>,
    undeletable: HashSet<String>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with text content, replacing any file at the same path.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        {
            let mut state = self.state.write();
            state.files.retain(|f| f.path != path);
            state.files.push(MemoryFile {
                path: path.to_string(),
                content: content.to_string(),
            });
        }
        self
    }

    /// Add a binary-ish file with no meaningful content.
    pub fn with_blob(self, path: &str) -> Self {
        self.with_file(path, "")
    }

    /// Make reads of `path` fail.
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(path.to_string());
        self
    }

    /// Make deletion of `path` fail.
    pub fn with_undeletable(mut self, path: &str) -> Self {
        self.undeletable.insert(path.to_string());
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.state.read().files.iter().any(|f| f.path == path)
    }

    /// Current paths in insertion order.
    pub fn paths(&self) -> Vec<String> {
        self.state.read().files.iter().map(|f| f.path.clone()).collect()
    }

    /// Paths removed through [`FileDeleter::trash`], in removal order.
    pub fn trashed(&self) -> Vec<String> {
        self.state.read().trashed.clone()
    }
}

impl FileLister for MemoryVault {
    fn list_files(&self) -> Result<Vec<FileEntry>, ApiError> {
        Ok(self
            .state
            .read()
            .files
            .iter()
            .map(|f| FileEntry::from_path(f.path.clone()))
            .collect())
    }
}

#[async_trait]
impl ContentReader for MemoryVault {
    async fn read_text(&self, note: &FileEntry) -> Result<String, ApiError> {
        if self.unreadable.contains(&note.path) {
            return Err(StorageError::NotReadable(note.path.clone()).into());
        }
        self.state
            .read()
            .files
            .iter()
            .find(|f| f.path == note.path)
            .map(|f| f.content.clone())
            .ok_or_else(|| StorageError::NotFound(note.path.clone()).into())
    }
}

#[async_trait]
impl FileMover for MemoryVault {
    async fn exists(&self, path: &str) -> Result<bool, ApiError> {
        Ok(self.contains(path))
    }

    async fn rename(&self, file: &FileEntry, destination: &str) -> Result<(), ApiError> {
        let mut state = self.state.write();
        if state.files.iter().any(|f| f.path == destination) {
            return Err(StorageError::DestinationExists(destination.to_string()).into());
        }
        let entry = state
            .files
            .iter_mut()
            .find(|f| f.path == file.path)
            .ok_or_else(|| StorageError::NotFound(file.path.clone()))?;
        entry.path = destination.to_string();
        Ok(())
    }
}

#[async_trait]
impl FileDeleter for MemoryVault {
    async fn trash(&self, file: &FileEntry) -> Result<(), ApiError> {
        if self.undeletable.contains(&file.path) {
            return Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("cannot delete {}", file.path),
            ))
            .into());
        }
        let mut state = self.state.write();
        let before = state.files.len();
        state.files.retain(|f| f.path != file.path);
        if state.files.len() == before {
            return Err(StorageError::NotFound(file.path.clone()).into());
        }
        state.trashed.push(file.path.clone());
        Ok(())
    }
}
