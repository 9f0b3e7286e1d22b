use attachprune::classify::{compute_unused_and_relocations, ClassifyOptions, Verdict};
use attachprune::sweep::{run_sweep, AssumeAnswer, DeletionOutcome, RelocationOutcome};
use attachprune::vault::{DeleteMode, FileLister, FsVault, MemoryVault};

use crate::integration::support::vault_on_disk;

fn relocating() -> ClassifyOptions {
    ClassifyOptions {
        relocate_banners_to_root: true,
        ..ClassifyOptions::default()
    }
}

#[tokio::test]
async fn sibling_note_keeps_referenced_image_only() {
    let temp = vault_on_disk(&[
        ("notes/a.md", "see ![](attachments/img1.png)"),
        ("notes/attachments/img1.png", "png"),
        ("notes/attachments/img2.png", "png"),
    ]);
    let vault = FsVault::open(temp.path(), DeleteMode::Permanent).unwrap();
    let files = vault.list_files().unwrap();
    let plan = compute_unused_and_relocations(&files, &vault, &ClassifyOptions::default()).await;

    assert_eq!(plan.used.len(), 1);
    assert_eq!(plan.used[0].file.name, "img1.png");
    assert_eq!(plan.unused.len(), 1);
    assert_eq!(plan.unused[0].file.name, "img2.png");

    let report = run_sweep(&vault, &AssumeAnswer(true), &ClassifyOptions::default(), false)
        .await
        .unwrap();
    assert_eq!(report.deleted_count(), 1);
    assert!(temp.path().join("notes/attachments/img1.png").exists());
    assert!(!temp.path().join("notes/attachments/img2.png").exists());
}

#[tokio::test]
async fn root_note_without_mention_leaves_logo_unused() {
    let temp = vault_on_disk(&[("root.md", ""), ("attachments/logo.png", "png")]);
    let vault = FsVault::open(temp.path(), DeleteMode::Permanent).unwrap();
    let files = vault.list_files().unwrap();
    let plan = compute_unused_and_relocations(&files, &vault, &ClassifyOptions::default()).await;

    assert_eq!(plan.unused.len(), 1);
    assert_eq!(plan.unused[0].file.path, "attachments/logo.png");
    assert_eq!(plan.unused[0].scope_key.as_deref(), Some("/"));
    assert_eq!(plan.unused[0].verdict, Verdict::Unreferenced);
}

#[tokio::test]
async fn banner_is_moved_to_root_and_never_deleted() {
    let temp = vault_on_disk(&[("folder/attachments/banner-top.jpg", "jpg")]);
    let vault = FsVault::open(temp.path(), DeleteMode::Trash).unwrap();
    let report = run_sweep(&vault, &AssumeAnswer(true), &relocating(), false)
        .await
        .unwrap();

    assert_eq!(report.plan.relocate.len(), 1);
    assert!(report.plan.unused.is_empty());
    assert_eq!(
        report.relocations,
        vec![RelocationOutcome::Moved {
            from: "folder/attachments/banner-top.jpg".to_string(),
            to: "attachments/banner-top.jpg".to_string(),
        }]
    );
    assert_eq!(report.deletion, DeletionOutcome::NothingToDelete);
    assert!(temp.path().join("attachments/banner-top.jpg").exists());
    assert!(!temp.path().join("folder/attachments/banner-top.jpg").exists());
}

#[tokio::test]
async fn legacy_banner_survives_with_relocation_off() {
    let vault = MemoryVault::new()
        .with_file("trip/itinerary.md", "nothing relevant")
        .with_blob("trip/attachments/Banner-Image-1.jpg");
    let report = run_sweep(&vault, &AssumeAnswer(true), &ClassifyOptions::default(), false)
        .await
        .unwrap();
    assert_eq!(report.deletion, DeletionOutcome::NothingToDelete);
    assert!(vault.contains("trip/attachments/Banner-Image-1.jpg"));
}

#[tokio::test]
async fn relocated_banner_is_kept_even_without_references() {
    let vault = MemoryVault::new()
        .with_file("folder/a.md", "")
        .with_blob("folder/attachments/banner-hero.png");
    let files = vault.list_files().unwrap();
    let plan = compute_unused_and_relocations(&files, &vault, &relocating()).await;
    assert!(plan.unused.is_empty());
    assert_eq!(
        plan.relocate[0].destination(),
        Some("attachments/banner-hero.png")
    );
}

#[tokio::test]
async fn deleted_files_are_not_rescanned() {
    let temp = vault_on_disk(&[("n/a.md", ""), ("n/attachments/old.png", "png")]);
    let vault = FsVault::open(temp.path(), DeleteMode::Permanent).unwrap();
    let first = run_sweep(&vault, &AssumeAnswer(true), &ClassifyOptions::default(), false)
        .await
        .unwrap();
    assert_eq!(first.deleted_count(), 1);

    let second = run_sweep(&vault, &AssumeAnswer(true), &ClassifyOptions::default(), false)
        .await
        .unwrap();
    assert_eq!(second.plan.attachment_count(), 0);
    assert_eq!(second.deletion, DeletionOutcome::NothingToDelete);
}
