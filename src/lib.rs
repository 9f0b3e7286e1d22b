//! Attachprune: Unused Attachment Cleanup
//!
//! Finds attachment files inside per-folder `attachments/` directories of a
//! note vault that no sibling note mentions, and removes them after
//! confirmation. Banner images can optionally be gathered into the root
//! `attachments/` folder instead.

pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod scope;
pub mod sweep;
pub mod tooling;
pub mod types;
pub mod vault;

pub use classify::{
    classify, compute_unused_and_relocations, ClassificationResult, ClassifyOptions, SweepPlan,
    Tag, Verdict,
};
pub use scope::{build_scopes, resolve_scope_key, ScopeIndex};
pub use types::FileEntry;
