//! Result types for applying a sweep plan.

use crate::classify::SweepPlan;
use serde::Serialize;

/// What happened to one relocation candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelocationOutcome {
    Moved { from: String, to: String },
    /// Destination already occupied; the source stays where it is.
    SkippedCollision { from: String, to: String },
    Failed { from: String, to: String, error: String },
    /// Dry run: would have been moved.
    Planned { from: String, to: String },
}

/// A file that could not be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFailure {
    pub path: String,
    pub error: String,
}

/// Result of the deletion phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeletionOutcome {
    NothingToDelete,
    Cancelled { count: usize },
    DryRun { count: usize },
    Completed {
        deleted: Vec<String>,
        failed: Vec<DeleteFailure>,
    },
}

/// Plan plus everything done with it.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub plan: SweepPlan,
    pub relocations: Vec<RelocationOutcome>,
    pub deletion: DeletionOutcome,
    /// User-facing notices, in the order they were raised.
    pub notices: Vec<String>,
}

impl SweepReport {
    pub fn moved_count(&self) -> usize {
        self.relocations
            .iter()
            .filter(|r| matches!(r, RelocationOutcome::Moved { .. }))
            .count()
    }

    pub fn deleted_count(&self) -> usize {
        match &self.deletion {
            DeletionOutcome::Completed { deleted, .. } => deleted.len(),
            _ => 0,
        }
    }

    /// Whether any relocation or deletion failed.
    pub fn has_failures(&self) -> bool {
        let relocation_failed = self
            .relocations
            .iter()
            .any(|r| matches!(r, RelocationOutcome::Failed { .. }));
        let deletion_failed = matches!(
            &self.deletion,
            DeletionOutcome::Completed { failed, .. } if !failed.is_empty()
        );
        relocation_failed || deletion_failed
    }
}
