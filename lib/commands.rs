//! CLI command definitions.

use clap::{Parser, Subcommand};

use crate::styles::styles;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const CLI_EXAMPLES: &str = "\
Examples:
  claude-setup                          Interactive component selection
  claude-setup -p ~/work/api            Select components for another project
  claude-setup generate --yes           Regenerate from the existing CLAUDE.md
  claude-setup list                     Show available components and MCP servers";

const GENERATE_EXAMPLES: &str = "\
Examples:
  claude-setup generate                 Interactive selection, then write CLAUDE.md
  claude-setup generate --yes           Write directly from imported selections
  claude-setup -p ~/work/api generate   Target a specific project";

const LIST_EXAMPLES: &str = "\
Examples:
  claude-setup list                     Human-readable catalog listing
  claude-setup list --json              JSON output for scripts";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Claude Setup Manager - Optimize Claude Code token usage.
#[derive(Debug, Parser)]
#[command(name = "claude-setup", author, version, styles = styles())]
#[command(
    about = "Assemble Claude Code project configurations",
    after_help = CLI_EXAMPLES
)]
pub struct Cli {
    /// Project directory (defaults to the current directory).
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    /// Subcommand to run; interactive selection when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate CLAUDE.md for the project.
    #[command(after_help = GENERATE_EXAMPLES)]
    Generate {
        /// Skip prompts and write from the imported selection.
        #[arg(short, long)]
        yes: bool,
    },

    /// List available components and MCP servers.
    #[command(after_help = LIST_EXAMPLES)]
    List {
        /// JSON output for parsing.
        #[arg(long)]
        json: bool,
    },

    /// Synchronize with the remote setup repository.
    Sync,

    /// Upload local setup changes to the remote repository.
    Upload,

    /// Download setup updates from the remote repository.
    Download,
}
