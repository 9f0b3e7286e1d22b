//! Sweep execution
//!
//! Applies a [`SweepPlan`]: banners are relocated, then unused attachments are
//! removed after a single confirmation. Every file is handled independently so
//! one failure never stops the rest of the batch.

mod confirm;
mod report;

pub use confirm::{attachment_noun, deletion_prompt, AssumeAnswer, Confirmer, DialoguerConfirmer};
pub use report::{DeleteFailure, DeletionOutcome, RelocationOutcome, SweepReport};

use crate::classify::{compute_unused_and_relocations, ClassifyOptions, SweepPlan};
use crate::error::{ApiError, StorageError};
use crate::vault::{ContentReader, FileDeleter, FileLister, FileMover};

/// Move relocation candidates to the root attachments folder.
///
/// An occupied destination skips the file and leaves it in place.
pub async fn relocate_banners(
    plan: &SweepPlan,
    mover: &dyn FileMover,
    dry_run: bool,
) -> Vec<RelocationOutcome> {
    let mut outcomes = Vec::with_capacity(plan.relocate.len());
    for candidate in &plan.relocate {
        let Some(destination) = candidate.destination() else {
            continue;
        };
        let from = candidate.file.path.clone();
        let to = destination.to_string();

        let occupied = match mover.exists(&to).await {
            Ok(occupied) => occupied,
            Err(e) => {
                tracing::error!("Failed to check destination {}: {}", to, e);
                outcomes.push(RelocationOutcome::Failed {
                    from,
                    to,
                    error: e.to_string(),
                });
                continue;
            }
        };
        if occupied {
            tracing::warn!("Not moving {}: {} already exists", from, to);
            outcomes.push(RelocationOutcome::SkippedCollision { from, to });
            continue;
        }
        if dry_run {
            outcomes.push(RelocationOutcome::Planned { from, to });
            continue;
        }

        match mover.rename(&candidate.file, &to).await {
            Ok(()) => {
                tracing::info!("Moved {} to {}", from, to);
                outcomes.push(RelocationOutcome::Moved { from, to });
            }
            Err(ApiError::StorageError(StorageError::DestinationExists(_))) => {
                tracing::warn!("Not moving {}: {} already exists", from, to);
                outcomes.push(RelocationOutcome::SkippedCollision { from, to });
            }
            Err(e) => {
                tracing::error!("Failed to move {} to {}: {}", from, to, e);
                outcomes.push(RelocationOutcome::Failed {
                    from,
                    to,
                    error: e.to_string(),
                });
            }
        }
    }
    outcomes
}

/// Confirm once, then remove every unused attachment.
///
/// Declining removes nothing. Individual failures are collected, not raised;
/// only a failing prompt is an error.
pub async fn delete_unused(
    plan: &SweepPlan,
    deleter: &dyn FileDeleter,
    confirmer: &dyn Confirmer,
    dry_run: bool,
) -> Result<DeletionOutcome, ApiError> {
    let count = plan.unused.len();
    if count == 0 {
        return Ok(DeletionOutcome::NothingToDelete);
    }
    let unused_paths: Vec<&str> = plan.unused_files().map(|f| f.path.as_str()).collect();
    tracing::info!(count, files = ?unused_paths, "Unused attachments");
    if dry_run {
        return Ok(DeletionOutcome::DryRun { count });
    }
    if !confirmer.confirm(&deletion_prompt(count))? {
        tracing::info!(count, "Deletion declined");
        return Ok(DeletionOutcome::Cancelled { count });
    }

    let mut deleted = Vec::with_capacity(count);
    let mut failed = Vec::new();
    for file in plan.unused_files() {
        match deleter.trash(file).await {
            Ok(()) => deleted.push(file.path.clone()),
            Err(e) => {
                tracing::error!("Failed to delete {}: {}", file.path, e);
                failed.push(DeleteFailure {
                    path: file.path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    Ok(DeletionOutcome::Completed { deleted, failed })
}

/// List, classify, relocate, confirm, and delete.
pub async fn run_sweep<V>(
    vault: &V,
    confirmer: &dyn Confirmer,
    options: &ClassifyOptions,
    dry_run: bool,
) -> Result<SweepReport, ApiError>
where
    V: FileLister + ContentReader + FileMover + FileDeleter,
{
    let files = vault.list_files()?;
    let plan = compute_unused_and_relocations(&files, vault, options).await;
    let relocations = relocate_banners(&plan, vault, dry_run).await;
    let deletion = delete_unused(&plan, vault, confirmer, dry_run).await?;
    let notices = build_notices(&relocations, &deletion);
    Ok(SweepReport {
        plan,
        relocations,
        deletion,
        notices,
    })
}

fn build_notices(relocations: &[RelocationOutcome], deletion: &DeletionOutcome) -> Vec<String> {
    let mut notices = Vec::new();
    let mut moved = 0;
    for outcome in relocations {
        match outcome {
            RelocationOutcome::Moved { .. } => moved += 1,
            RelocationOutcome::SkippedCollision { from, to } => {
                notices.push(format!("Skipped moving {}: {} already exists.", from, to))
            }
            RelocationOutcome::Failed { from, error, .. } => {
                notices.push(format!("Failed to move {}: {}", from, error))
            }
            RelocationOutcome::Planned { from, to } => {
                notices.push(format!("Would move {} to {}.", from, to))
            }
        }
    }
    if moved > 0 {
        notices.push(format!(
            "Moved {} banner {} to attachments/.",
            moved,
            attachment_noun(moved)
        ));
    }

    match deletion {
        DeletionOutcome::NothingToDelete => {
            notices.push("No unused attachments found!".to_string())
        }
        DeletionOutcome::Cancelled { .. } => {
            notices.push("Deletion cancelled; no files were removed.".to_string())
        }
        DeletionOutcome::DryRun { count } => notices.push(format!(
            "Dry run: {} unused {} would be deleted.",
            count,
            attachment_noun(*count)
        )),
        DeletionOutcome::Completed { deleted, failed } => {
            for failure in failed {
                notices.push(format!("Failed to delete {}: {}", failure.path, failure.error));
            }
            notices.push(format!(
                "Deleted {} unused {} from attachments/.",
                deleted.len(),
                attachment_noun(deleted.len())
            ));
        }
    }
    notices
}
