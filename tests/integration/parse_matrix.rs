use attachprune::tooling::cli::{Cli, Commands, SettingsCommands};
use clap::{CommandFactory, Parser};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["attachprune", "scan"],
        vec!["attachprune", "scan", "--format", "json", "--include-used"],
        vec!["attachprune", "--vault", "/tmp/vault", "clean"],
        vec!["attachprune", "clean", "--yes", "--dry-run"],
        vec!["attachprune", "clean", "-y", "--format", "json"],
        vec!["attachprune", "settings", "show"],
        vec!["attachprune", "settings", "set", "move-banners-to-root", "true"],
        vec!["attachprune", "--log-level", "debug", "--log-output", "stderr", "scan"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_incomplete_commands() {
    assert!(Cli::try_parse_from(["attachprune"]).is_err());
    assert!(Cli::try_parse_from(["attachprune", "settings", "set", "move-banners-to-root"]).is_err());
    assert!(Cli::try_parse_from(["attachprune", "purge"]).is_err());
}

#[test]
fn parse_settings_set_arguments() {
    let cli = Cli::try_parse_from(["attachprune", "settings", "set", "move-banners-to-root", "on"])
        .unwrap();
    match cli.command {
        Commands::Settings {
            command: SettingsCommands::Set { key, value },
        } => {
            assert_eq!(key, "move-banners-to-root");
            assert_eq!(value, "on");
        }
        _ => panic!("expected settings set"),
    }
}

#[test]
fn clean_defaults_to_prompting() {
    let cli = Cli::try_parse_from(["attachprune", "clean"]).unwrap();
    assert_eq!(cli.vault, std::path::PathBuf::from("."));
    match cli.command {
        Commands::Clean {
            yes,
            dry_run,
            format,
        } => {
            assert!(!yes);
            assert!(!dry_run);
            assert_eq!(format, "text");
        }
        _ => panic!("expected clean"),
    }
}

#[test]
fn help_lists_every_command() {
    let help = Cli::command().render_help().to_string();
    for name in ["scan", "clean", "settings"] {
        assert!(help.contains(name), "help should mention {name}");
    }
}
