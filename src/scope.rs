//! Scope Indexer
//!
//! Maps each directory to the notes residing directly in it, and resolves the
//! directory whose notes may reference a given attachment.

use crate::classify::is_note;
use crate::types::{DirectoryKey, FileEntry, ROOT_ATTACHMENTS_PREFIX, ROOT_DIRECTORY_KEY};
use std::collections::HashMap;

const ATTACHMENTS_SEGMENT: &[u8] = b"/attachments/";

/// Directory key -> notes directly inside that directory, in listing order.
#[derive(Debug, Clone, Default)]
pub struct ScopeIndex {
    scopes: HashMap<DirectoryKey, Vec<FileEntry>>,
}

impl ScopeIndex {
    /// Notes whose parent directory equals `key`, if any exist.
    pub fn notes_in(&self, key: &str) -> Option<&[FileEntry]> {
        self.scopes.get(key).map(Vec::as_slice)
    }

    /// Number of directories holding at least one note.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Total number of indexed notes.
    pub fn note_count(&self) -> usize {
        self.scopes.values().map(Vec::len).sum()
    }
}

/// Group note files by their immediate parent directory.
///
/// Non-recursive: a note belongs only to its own directory. Files whose
/// extension is not `note_extension` are ignored.
pub fn build_scopes(files: &[FileEntry], note_extension: &str) -> ScopeIndex {
    let mut scopes: HashMap<DirectoryKey, Vec<FileEntry>> = HashMap::new();
    for file in files.iter().filter(|f| is_note(f, note_extension)) {
        let key = if file.parent_directory_path.is_empty() || file.is_at_root() {
            ROOT_DIRECTORY_KEY.to_string()
        } else {
            file.parent_directory_path.clone()
        };
        scopes.entry(key).or_default().push(file.clone());
    }
    tracing::debug!(
        directories = scopes.len(),
        notes = scopes.values().map(Vec::len).sum::<usize>(),
        "Built note scopes"
    );
    ScopeIndex { scopes }
}

/// Resolve the directory whose notes are candidates for an attachment.
///
/// `attachments/...` maps to the root key. Otherwise the key is everything
/// before the first `/attachments/` (ASCII case-insensitive). A path with no
/// such segment yields the empty key, which never holds notes.
pub fn resolve_scope_key(path: &str) -> DirectoryKey {
    if path.starts_with(ROOT_ATTACHMENTS_PREFIX) {
        return ROOT_DIRECTORY_KEY.to_string();
    }
    match find_attachments_segment(path) {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

/// Byte offset of the first `/attachments/` segment, ignoring ASCII case.
pub(crate) fn find_attachments_segment(path: &str) -> Option<usize> {
    path.as_bytes()
        .windows(ATTACHMENTS_SEGMENT.len())
        .position(|window| window.eq_ignore_ascii_case(ATTACHMENTS_SEGMENT))
}
