//! Unused Attachment Classifier
//!
//! Decides for every attachment whether it is relocated, exempt, referenced
//! by a sibling note, or unused. Attachments are classified independently of
//! each other; the only shared input is the immutable [`ScopeIndex`].

use crate::scope::{build_scopes, find_attachments_segment, resolve_scope_key, ScopeIndex};
use crate::types::{
    DirectoryKey, FileEntry, ATTACHMENT_EXTENSIONS, DEFAULT_NOTE_EXTENSION,
    ROOT_ATTACHMENTS_PREFIX,
};
use crate::vault::ContentReader;
use futures::stream::{self, StreamExt};
use serde::Serialize;

/// Name prefix (case-insensitive) of banners moved to the root attachments folder.
pub const BANNER_PREFIX: &str = "banner";

/// Name prefix (case-insensitive) of banners that are never deleted.
pub const LEGACY_BANNER_PREFIX: &str = "banner-image";

/// Options controlling a classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Route `banner*` attachments to the root `attachments/` folder.
    pub relocate_banners_to_root: bool,
    /// Extension identifying notes.
    pub note_extension: String,
    /// Note reads in flight per attachment. 1 reads strictly one at a time.
    pub read_concurrency: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            relocate_banners_to_root: false,
            note_extension: DEFAULT_NOTE_EXTENSION.to_string(),
            read_concurrency: 1,
        }
    }
}

/// Partition an attachment lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Relocate,
    Unused,
    Used,
}

/// Why an attachment received its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Banner eligible for relocation to the root attachments folder.
    Relocate { destination: String },
    /// Banner kept regardless of references.
    BannerExempt,
    /// A candidate note mentions the filename.
    Referenced { note: String },
    /// The scope holds no notes at all.
    NoSiblingNotes,
    /// No candidate note mentions the filename.
    Unreferenced,
}

impl Verdict {
    pub fn tag(&self) -> Tag {
        match self {
            Verdict::Relocate { .. } => Tag::Relocate,
            Verdict::BannerExempt | Verdict::Referenced { .. } => Tag::Used,
            Verdict::NoSiblingNotes | Verdict::Unreferenced => Tag::Unused,
        }
    }
}

/// Outcome for one attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub file: FileEntry,
    /// Resolved scope, `None` when the attachment was exempt before scoping.
    pub scope_key: Option<DirectoryKey>,
    pub verdict: Verdict,
    /// Candidate notes that could not be read and counted as non-matching.
    pub read_failures: usize,
}

impl ClassificationResult {
    pub fn tag(&self) -> Tag {
        self.verdict.tag()
    }

    /// Destination for relocated attachments.
    pub fn destination(&self) -> Option<&str> {
        match &self.verdict {
            Verdict::Relocate { destination } => Some(destination),
            _ => None,
        }
    }
}

/// Classified attachments split by tag, each in listing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepPlan {
    pub relocate: Vec<ClassificationResult>,
    pub unused: Vec<ClassificationResult>,
    pub used: Vec<ClassificationResult>,
    pub notes_indexed: usize,
    pub read_failures: usize,
}

impl SweepPlan {
    pub fn attachment_count(&self) -> usize {
        self.relocate.len() + self.unused.len() + self.used.len()
    }

    pub fn unused_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.unused.iter().map(|r| &r.file)
    }
}

/// Whether `entry` is an attachment: a recognized extension inside an
/// `attachments` folder (`attachments/` at root, or `/attachments/` in any case).
pub fn is_attachment(entry: &FileEntry) -> bool {
    ATTACHMENT_EXTENSIONS.contains(&entry.extension.as_str())
        && (entry.path.starts_with(ROOT_ATTACHMENTS_PREFIX)
            || find_attachments_segment(&entry.path).is_some())
}

/// Whether `entry` is a note document with the configured extension.
pub fn is_note(entry: &FileEntry, note_extension: &str) -> bool {
    entry.extension == note_extension
}

/// Classify each attachment against the notes in its scope.
///
/// Attachments and their candidate notes are visited in order; the reference
/// scan for an attachment stops at the first matching note.
pub async fn classify(
    attachments: &[FileEntry],
    scopes: &ScopeIndex,
    reader: &dyn ContentReader,
    options: &ClassifyOptions,
) -> Vec<ClassificationResult> {
    let mut results = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        let result = classify_one(attachment, scopes, reader, options).await;
        tracing::debug!(
            path = %result.file.path,
            verdict = ?result.verdict,
            "Classified attachment"
        );
        results.push(result);
    }
    results
}

async fn classify_one(
    attachment: &FileEntry,
    scopes: &ScopeIndex,
    reader: &dyn ContentReader,
    options: &ClassifyOptions,
) -> ClassificationResult {
    if let Some(verdict) = banner_verdict(attachment, options) {
        return ClassificationResult {
            file: attachment.clone(),
            scope_key: None,
            verdict,
            read_failures: 0,
        };
    }

    let scope_key = resolve_scope_key(&attachment.path);
    let notes = scopes.notes_in(&scope_key).unwrap_or(&[]);
    let (verdict, read_failures) = if notes.is_empty() {
        (Verdict::NoSiblingNotes, 0)
    } else {
        let needle = attachment.name.to_lowercase();
        match find_reference(&needle, notes, reader, options.read_concurrency).await {
            (Some(note), failures) => (Verdict::Referenced { note }, failures),
            (None, failures) => (Verdict::Unreferenced, failures),
        }
    };

    ClassificationResult {
        file: attachment.clone(),
        scope_key: Some(scope_key),
        verdict,
        read_failures,
    }
}

/// Banner handling that bypasses the reference scan.
///
/// With relocation on, any `banner*` file is relocated (or kept, if it already
/// lives in the root folder). `banner-image*` files are always kept.
fn banner_verdict(attachment: &FileEntry, options: &ClassifyOptions) -> Option<Verdict> {
    let name = attachment.name.to_lowercase();
    if options.relocate_banners_to_root && name.starts_with(BANNER_PREFIX) {
        if attachment.path.starts_with(ROOT_ATTACHMENTS_PREFIX) {
            return Some(Verdict::BannerExempt);
        }
        return Some(Verdict::Relocate {
            destination: format!("{}{}", ROOT_ATTACHMENTS_PREFIX, attachment.name),
        });
    }
    if name.starts_with(LEGACY_BANNER_PREFIX) {
        return Some(Verdict::BannerExempt);
    }
    None
}

/// Path of the first note whose lower-cased text contains `needle`, plus the
/// number of notes that failed to read along the way.
async fn find_reference(
    needle: &str,
    notes: &[FileEntry],
    reader: &dyn ContentReader,
    concurrency: usize,
) -> (Option<String>, usize) {
    let mut reads = stream::iter(notes)
        .map(|note| async move { (note, reader.read_text(note).await) })
        .buffered(concurrency.max(1));

    let mut failures = 0;
    while let Some((note, result)) = reads.next().await {
        match result {
            Ok(text) => {
                if text.to_lowercase().contains(needle) {
                    return (Some(note.path.clone()), failures);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read note {}: {}; treating as no reference", note.path, e);
                failures += 1;
            }
        }
    }
    (None, failures)
}

/// Classify every attachment in a vault listing and split the results.
pub async fn compute_unused_and_relocations(
    files: &[FileEntry],
    reader: &dyn ContentReader,
    options: &ClassifyOptions,
) -> SweepPlan {
    let scopes = build_scopes(files, &options.note_extension);
    let attachments: Vec<FileEntry> = files.iter().filter(|f| is_attachment(f)).cloned().collect();
    tracing::info!(
        files = files.len(),
        attachments = attachments.len(),
        notes = scopes.note_count(),
        "Classifying attachments"
    );

    let mut plan = SweepPlan {
        notes_indexed: scopes.note_count(),
        ..SweepPlan::default()
    };
    for result in classify(&attachments, &scopes, reader, options).await {
        plan.read_failures += result.read_failures;
        match result.tag() {
            Tag::Relocate => plan.relocate.push(result),
            Tag::Unused => plan.unused.push(result),
            Tag::Used => plan.used.push(result),
        }
    }

    tracing::info!(
        relocate = plan.relocate.len(),
        unused = plan.unused.len(),
        used = plan.used.len(),
        read_failures = plan.read_failures,
        "Classification complete"
    );
    plan
}
