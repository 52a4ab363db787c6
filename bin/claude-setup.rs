//! `claude-setup` is the primary CLI binary.

use clap::Parser;
use claude_setup_cli::{Cli, Command, SetupError, SetupResult, handlers};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() {
    init_tracing();

    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &SetupError) {
    println!();
    match e {
        SetupError::SetupRootNotFound(path) => {
            println!(
                "  {} Setup directory not found",
                "error".bright_red().bold()
            );
            println!();
            println!("    {}: {}", "Expected".dimmed(), path.display());
            println!();
            println!("    {}", "hint:".bright_blue().bold());
            println!("      Clone the setup repository first:");
            println!(
                "      {}",
                format!(
                    "git clone https://github.com/NOGIT007/claude-setup {}",
                    path.display()
                )
                .bright_white()
            );
        }
        SetupError::ProjectNotFound(path) => {
            println!(
                "  {} Project path does not exist: {}",
                "error".bright_red().bold(),
                path.display().to_string().bright_white()
            );
        }
        SetupError::BackupFailed { path, source } => {
            println!(
                "  {} Backup failed, {} left untouched",
                "error".bright_red().bold(),
                path.display()
            );
            println!();
            println!("    {}", source);
        }
        SetupError::Cancelled => {
            println!("  {}", "Operation cancelled".dimmed());
        }
        _ => {
            println!("  {} {}", "error".bright_red().bold(), e);
        }
    }
    println!();
}

/// Initialize tracing. Only enables logging when RUST_LOG is set.
fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    // Without a subscriber, all tracing events are discarded.
    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .init();
}

fn run() -> SetupResult<()> {
    let cli = Cli::parse();

    match cli.command {
        None => handlers::interactive(cli.project),
        Some(Command::Generate { yes }) => handlers::generate(cli.project, yes),
        Some(Command::List { json }) => handlers::list(json),
        Some(Command::Sync) => handlers::sync(),
        Some(Command::Upload) => handlers::upload(),
        Some(Command::Download) => handlers::download(),
    }
}
