use attachprune::sweep::AssumeAnswer;
use attachprune::config::VAULT_CONFIG_FILE;
use attachprune::tooling::cli::{apply_setting, CliContext, Commands, SettingsCommands};
use tempfile::TempDir;

use crate::integration::support::{config_file, vault_on_disk};

#[tokio::test]
async fn scan_reports_without_modifying() {
    let temp = vault_on_disk(&[
        ("notes/a.md", "![](attachments/keep.png)"),
        ("notes/attachments/keep.png", "png"),
        ("notes/attachments/drop.png", "png"),
    ]);
    let cfg_dir = TempDir::new().unwrap();
    let cfg = config_file(&cfg_dir, false);
    let cli = CliContext::new(temp.path().to_path_buf(), Some(cfg)).unwrap();

    let output = cli
        .execute(&Commands::Scan {
            format: "json".to_string(),
            include_used: false,
        })
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["unused"].as_array().unwrap().len(), 1);
    assert_eq!(
        value["unused"][0]["file"]["path"],
        "notes/attachments/drop.png"
    );
    assert_eq!(value["unused"][0]["verdict"]["kind"], "unreferenced");
    assert!(temp.path().join("notes/attachments/drop.png").exists());
}

#[tokio::test]
async fn clean_declined_keeps_files() {
    let temp = vault_on_disk(&[("n/a.md", ""), ("n/attachments/x.png", "png")]);
    let cfg_dir = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), Some(config_file(&cfg_dir, false))).unwrap();

    let output = cli
        .execute_with(
            &Commands::Clean {
                yes: false,
                dry_run: false,
                format: "text".to_string(),
            },
            &AssumeAnswer(false),
        )
        .await
        .unwrap();
    assert!(output.contains("Deletion cancelled"));
    assert!(temp.path().join("n/attachments/x.png").exists());
}

#[tokio::test]
async fn clean_with_yes_deletes_and_reports() {
    let temp = vault_on_disk(&[
        ("n/a.md", ""),
        ("n/attachments/x.png", "png"),
        ("n/attachments/y.pdf", "pdf"),
    ]);
    let cfg_dir = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), Some(config_file(&cfg_dir, false))).unwrap();

    let output = cli
        .execute_with(
            &Commands::Clean {
                yes: true,
                dry_run: false,
                format: "text".to_string(),
            },
            &AssumeAnswer(false),
        )
        .await
        .unwrap();
    assert!(output.contains("Deleted 2 unused attachments from attachments/."));
    assert!(!temp.path().join("n/attachments/x.png").exists());
    assert!(!temp.path().join("n/attachments/y.pdf").exists());
}

#[tokio::test]
async fn clean_relocates_banners_when_enabled() {
    let temp = vault_on_disk(&[("folder/attachments/banner-top.jpg", "jpg")]);
    let cfg_dir = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), Some(config_file(&cfg_dir, true))).unwrap();

    let output = cli
        .execute_with(
            &Commands::Clean {
                yes: false,
                dry_run: false,
                format: "json".to_string(),
            },
            &AssumeAnswer(false),
        )
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["relocations"][0]["status"], "moved");
    assert_eq!(value["deletion"]["status"], "nothing_to_delete");
    assert!(temp.path().join("attachments/banner-top.jpg").exists());
}

#[tokio::test]
async fn settings_set_persists_into_vault_file() {
    let temp = vault_on_disk(&[("a.md", "")]);
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    let output = cli
        .execute(&Commands::Settings {
            command: SettingsCommands::Set {
                key: "move-banners-to-root".to_string(),
                value: "true".to_string(),
            },
        })
        .await
        .unwrap();
    assert!(output.contains("move-banners-to-root = true"));

    let reloaded = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    assert!(reloaded.config().sweep.move_banners_to_root);

    let shown = reloaded
        .execute(&Commands::Settings {
            command: SettingsCommands::Show {
                format: "json".to_string(),
            },
        })
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(value["settings"]["move_banners_to_root"], true);
}

#[tokio::test]
async fn settings_set_rejects_unknown_key_and_bad_value() {
    let temp = vault_on_disk(&[("a.md", "")]);
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    for (key, value) in [("colour", "true"), ("move-banners-to-root", "sometimes")] {
        let result = cli
            .execute(&Commands::Settings {
                command: SettingsCommands::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            })
            .await;
        assert!(result.is_err(), "{key}={value} should be rejected");
    }
}

#[tokio::test]
async fn settings_set_with_explicit_config_writes_that_file() {
    let temp = vault_on_disk(&[("a.md", "")]);
    let cfg_dir = TempDir::new().unwrap();
    let cfg = config_file(&cfg_dir, false);
    let cli = CliContext::new(temp.path().to_path_buf(), Some(cfg.clone())).unwrap();

    let output = cli
        .execute(&Commands::Settings {
            command: SettingsCommands::Set {
                key: "move-banners-to-root".to_string(),
                value: "on".to_string(),
            },
        })
        .await
        .unwrap();
    assert!(output.contains(&cfg.display().to_string()));
    assert!(!temp.path().join(VAULT_CONFIG_FILE).exists());

    let reloaded = CliContext::new(temp.path().to_path_buf(), Some(cfg.clone())).unwrap();
    assert!(reloaded.config().sweep.move_banners_to_root);
    assert_eq!(
        reloaded.config().sweep.delete_mode,
        attachprune::vault::DeleteMode::Permanent
    );
}

#[test]
fn apply_setting_repairs_config_that_fails_to_load() {
    let temp = vault_on_disk(&[
        ("a.md", ""),
        (VAULT_CONFIG_FILE, "[sweep]\nmove_banners_to_root = \"maybe\"\n"),
    ]);
    assert!(CliContext::new(temp.path().to_path_buf(), None).is_err());

    apply_setting(temp.path(), None, "move-banners-to-root", "true").unwrap();

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    assert!(cli.config().sweep.move_banners_to_root);
}

#[test]
fn apply_setting_requires_existing_vault() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    assert!(apply_setting(&missing, None, "move-banners-to-root", "true").is_err());
    assert!(!missing.exists());
}

#[test]
fn context_requires_existing_vault() {
    let temp = TempDir::new().unwrap();
    let cfg_dir = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    assert!(CliContext::new(missing, Some(config_file(&cfg_dir, false))).is_err());
}

#[test]
fn context_resolves_vault_root() {
    let temp = vault_on_disk(&[("a.md", "")]);
    let cfg_dir = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), Some(config_file(&cfg_dir, false))).unwrap();
    assert_eq!(
        cli.vault_root(),
        dunce::canonicalize(temp.path()).unwrap().as_path()
    );
}
