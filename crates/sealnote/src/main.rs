// SPDX-FileCopyrightText: 2026 Sealnote Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sealnote -- encrypted-at-rest personal data behind one password.
//!
//! This is the binary entry point: config loading, tracing setup, the
//! provider-guard snapshot, and subcommand dispatch.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

/// Sealnote -- encrypted-at-rest personal data behind one password.
#[derive(Parser, Debug)]
#[command(name = "sealnote", version, about, long_about = None)]
struct Cli {
    /// Account name. Accepted for interface compatibility; it takes no
    /// part in key derivation or any check.
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Report whether a store exists and which flow applies.
    Status,
    /// Log in and print the decrypted data.
    Show,
    /// Log in and replace the stored data with TEXT (or stdin).
    Save {
        /// The new content; read from stdin when omitted.
        text: Option<String>,
    },
    /// Rotate the password and re-encrypt the stored data.
    ChangePassword,
    /// Destroy the store irrecoverably.
    Wipe {
        /// Confirm the wipe.
        #[arg(long)]
        yes: bool,
    },
}

/// Initializes the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sealnote={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match sealnote_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            sealnote_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.app.log_level);

    // Capture the crypto provider references before any sensitive
    // operation can run.
    sealnote_vault::provider::snapshot();

    let result = match cli.command {
        Commands::Status => commands::status(&config).await,
        Commands::Show => commands::show(&config, cli.user.as_deref()).await,
        Commands::Save { text } => commands::save(&config, cli.user.as_deref(), text).await,
        Commands::ChangePassword => {
            commands::change_password(&config, cli.user.as_deref()).await
        }
        Commands::Wipe { yes } => commands::wipe(&config, yes).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    #[serial_test::serial]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = sealnote_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.vault.kdf_iterations, 1_000_000);
    }
}
