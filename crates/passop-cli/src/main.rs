use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use passop_core::{FormField, PassopError};
use passop_infrastructure::{ConfigService, PassopPaths};

mod app;
mod commands;
mod console;
mod logging;

#[derive(Parser)]
#[command(name = "passop")]
#[command(about = "PassOP - keep track of site logins on this machine", long_about = None)]
struct Cli {
    /// Use this directory for both config and data instead of the platform defaults
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Log at debug level to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new password
    Add {
        #[arg(long)]
        site: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// List saved passwords
    List {
        /// Print passwords in clear text
        #[arg(long)]
        show_passwords: bool,
    },
    /// Delete a saved password
    Delete {
        /// Record id, or its position from `list`
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Re-enter a saved password's fields
    Edit {
        /// Record id, or its position from `list`
        id: String,
    },
    /// Copy one field of a saved password to the clipboard
    Copy {
        /// Record id, or its position from `list`
        id: String,
        /// site, username or password
        field: FormField,
    },
    /// Start an interactive session
    Repl,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let paths = PassopPaths::new(cli.data_dir.as_deref());
    let config_service = ConfigService::from_paths(&paths)?;
    let config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    let _log_guard = logging::init(&config.logging, &paths, cli.verbose);
    match config_service.ensure_exists() {
        Ok(true) => tracing::info!(
            "[Bootstrap] Wrote default config to {}",
            config_service.path().display()
        ),
        Ok(false) => {}
        Err(e) => tracing::warn!("[Bootstrap] Could not write default config: {}", e),
    }

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let mut manager = app::build_manager(&paths, &config, assume_yes)?;
    let reveal = !config.ui.mask_passwords;

    let result = match cli.command {
        Commands::Add {
            site,
            username,
            password,
        } => commands::add::run(&mut manager, site, username, password),
        Commands::List { show_passwords } => {
            commands::list::run(&manager, show_passwords || reveal);
            Ok(())
        }
        Commands::Delete { id, .. } => commands::delete::run(&mut manager, &id),
        Commands::Edit { id } => commands::edit::run(&mut manager, &id),
        Commands::Copy { id, field } => commands::copy::run(&manager, &id, field),
        Commands::Repl => commands::repl::run(&mut manager, reveal),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already shown to the user by the notifier.
        Err(e) if e.downcast_ref::<PassopError>().is_some() => {
            tracing::debug!("Command failed: {}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            Ok(ExitCode::FAILURE)
        }
    }
}
