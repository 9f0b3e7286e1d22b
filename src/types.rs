//! Core types shared by the scope indexer, the classifier, and vault hosts.

use serde::{Deserialize, Serialize};

/// Normalized directory key grouping notes into scopes.
pub type DirectoryKey = String;

/// Key used for the vault root directory.
pub const ROOT_DIRECTORY_KEY: &str = "/";

/// Path prefix of the root-level attachments folder.
pub const ROOT_ATTACHMENTS_PREFIX: &str = "attachments/";

/// Extensions (lower-cased, no dot) recognized as attachments.
pub const ATTACHMENT_EXTENSIONS: [&str; 10] = [
    "png", "jpg", "jpeg", "gif", "webp", "pdf", "svg", "mp3", "mp4", "wav",
];

/// Default extension of note documents.
pub const DEFAULT_NOTE_EXTENSION: &str = "md";

/// One file in a vault listing.
///
/// Snapshot data only: entries are produced by a [`crate::vault::FileLister`]
/// at the start of a run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    /// Slash-separated path relative to the vault root.
    pub path: String,
    /// Base filename including extension.
    pub name: String,
    /// Lower-cased extension without the leading dot.
    pub extension: String,
    /// Directory containing the file, `"/"` at the vault root.
    pub parent_directory_path: DirectoryKey,
}

impl FileEntry {
    /// Derive name, extension, and parent directory from a relative path.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let (parent, name) = match path.rfind('/') {
            Some(idx) => (path[..idx].to_string(), path[idx + 1..].to_string()),
            None => (ROOT_DIRECTORY_KEY.to_string(), path.clone()),
        };
        let parent_directory_path = if parent.is_empty() {
            ROOT_DIRECTORY_KEY.to_string()
        } else {
            parent
        };
        let extension = match name.rfind('.') {
            Some(idx) if idx > 0 => name[idx + 1..].to_ascii_lowercase(),
            _ => String::new(),
        };
        Self {
            path,
            name,
            extension,
            parent_directory_path,
        }
    }

    /// Whether the file sits directly in the vault root.
    pub fn is_at_root(&self) -> bool {
        self.parent_directory_path == ROOT_DIRECTORY_KEY
    }
}
