//! Filesystem-backed vault.

use crate::error::{ApiError, StorageError};
use crate::types::FileEntry;
use crate::vault::{ContentReader, FileDeleter, FileLister, FileMover};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// How unused attachments are removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Send to the operating system trash.
    #[default]
    Trash,
    /// Remove from disk.
    Permanent,
}

/// Vault rooted at a directory on disk.
///
/// Hidden entries (any segment starting with `.`) are never listed, which keeps
/// `.trash`, `.obsidian`, and `.git` out of every sweep.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    delete_mode: DeleteMode,
}

impl FsVault {
    /// Open a vault at `root`, which must be an existing directory.
    pub fn open(root: &Path, delete_mode: DeleteMode) -> Result<Self, ApiError> {
        let root = dunce::canonicalize(root).map_err(|e| {
            StorageError::InvalidPath(format!("{}: {}", root.display(), e))
        })?;
        if !root.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "Vault root is not a directory: {}",
                root.display()
            ))
            .into());
        }
        Ok(Self { root, delete_mode })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a vault-relative slash path, rejecting anything escaping the root.
    fn absolute(&self, relative: &str) -> Result<PathBuf, StorageError> {
        let mut path = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(name) => path.push(name),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::InvalidPath(relative.to_string()));
                }
            }
        }
        if path == self.root {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }
        Ok(path)
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let mut segments = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_str()?.to_string()),
                _ => return None,
            }
        }
        Some(segments.join("/"))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

impl FileLister for FsVault {
    fn list_files(&self) -> Result<Vec<FileEntry>, ApiError> {
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));
        let files = self.collect_files(walker);
        tracing::debug!(count = files.len(), root = %self.root.display(), "Listed vault files");
        Ok(files)
    }
}

impl FsVault {
    /// Keep regular files from a walk. Entries the walk cannot read are logged
    /// and skipped.
    fn collect_files<I>(&self, walker: I) -> Vec<FileEntry>
    where
        I: IntoIterator<Item = walkdir::Result<DirEntry>>,
    {
        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable vault entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match self.relative_path(entry.path()) {
                Some(rel) => files.push(FileEntry::from_path(rel)),
                None => tracing::warn!("Skipping non UTF-8 path: {:?}", entry.path()),
            }
        }
        files
    }
}

#[async_trait]
impl ContentReader for FsVault {
    async fn read_text(&self, note: &FileEntry) -> Result<String, ApiError> {
        let path = self.absolute(&note.path)?;
        let bytes = tokio::fs::read(&path).await.map_err(StorageError::IoError)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[async_trait]
impl FileMover for FsVault {
    async fn exists(&self, path: &str) -> Result<bool, ApiError> {
        let path = self.absolute(path)?;
        Ok(tokio::fs::try_exists(&path)
            .await
            .map_err(StorageError::IoError)?)
    }

    async fn rename(&self, file: &FileEntry, destination: &str) -> Result<(), ApiError> {
        let from = self.absolute(&file.path)?;
        let to = self.absolute(destination)?;
        if tokio::fs::try_exists(&to).await.map_err(StorageError::IoError)? {
            return Err(StorageError::DestinationExists(destination.to_string()).into());
        }
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StorageError::IoError)?;
        }
        tokio::fs::rename(&from, &to)
            .await
            .map_err(StorageError::IoError)?;
        tracing::debug!(from = %file.path, to = %destination, "Moved file");
        Ok(())
    }
}

#[async_trait]
impl FileDeleter for FsVault {
    async fn trash(&self, file: &FileEntry) -> Result<(), ApiError> {
        let source = self.absolute(&file.path)?;
        if !tokio::fs::try_exists(&source)
            .await
            .map_err(StorageError::IoError)?
        {
            return Err(StorageError::NotFound(file.path.clone()).into());
        }
        match self.delete_mode {
            DeleteMode::Permanent => {
                tokio::fs::remove_file(&source)
                    .await
                    .map_err(StorageError::IoError)?;
            }
            DeleteMode::Trash => {
                tokio::task::spawn_blocking(move || trash::delete(&source))
                    .await
                    .map_err(|e| StorageError::TrashFailed(format!("{}: {}", file.path, e)))?
                    .map_err(|e| StorageError::TrashFailed(format!("{}: {}", file.path, e)))?;
            }
        }
        tracing::debug!(path = %file.path, mode = ?self.delete_mode, "Removed file");
        Ok(())
    }
}
