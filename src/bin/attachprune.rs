//! Attachprune CLI Binary
//!
//! Command-line interface for finding and removing unused vault attachments.

use attachprune::logging::{init_logging, with_bootstrap_logging, LoggingConfig};
use attachprune::tooling::cli::{apply_setting, Cli, CliContext, Commands, SettingsCommands};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let bootstrap = cli.logging_config(&LoggingConfig::default());

    // Writing a setting must work even when the current config does not load.
    if let Commands::Settings {
        command: SettingsCommands::Set { key, value },
    } = &cli.command
    {
        if let Err(e) = init_logging(Some(&bootstrap)) {
            eprintln!("Error initializing logging: {}", e);
            process::exit(1);
        }
        match apply_setting(&cli.vault, cli.config.as_deref(), key, value) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let context = match with_bootstrap_logging(&bootstrap, || {
        CliContext::new(cli.vault.clone(), cli.config.clone())
    }) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error opening vault: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
