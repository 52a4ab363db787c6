//! Constants for claude-setup-cli.
//!
//! This module contains all path and token-model constants.
//! Review these to ensure they match your environment.

use std::path::PathBuf;
use std::sync::LazyLock;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The generated artifact file name.
pub const ARTIFACT_FILE: &str = "CLAUDE.md";

/// Directory under the project root holding the artifact and its history.
pub const CLAUDE_DIR: &str = ".claude";

/// Directory under [`CLAUDE_DIR`] holding timestamped artifact backups.
pub const HISTORY_DIR: &str = "history";

/// Number of artifact backups retained in the history directory.
pub const BACKUP_RETENTION: usize = 10;

/// Directory under the setup root holding MCP server manifests.
pub const MCP_SERVERS_DIR: &str = "mcp-servers";

/// The per-server MCP manifest file name.
pub const MCP_CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the setup root location.
pub const CLAUDE_SETUP_HOME_ENV: &str = "CLAUDE_SETUP_HOME";

/// Estimated token cost per selected agent.
pub const AGENT_TOKEN_ESTIMATE: u64 = 200;

/// Estimated token cost per selected command.
pub const COMMAND_TOKEN_ESTIMATE: u64 = 150;

/// Estimated token cost per selected output style.
pub const OUTPUT_STYLE_TOKEN_ESTIMATE: u64 = 100;

/// Context window size the token percentage is reported against.
pub const CONTEXT_WINDOW_TOKENS: u64 = 200_000;

/// Default setup root holding component and MCP server definitions.
pub static DEFAULT_SETUP_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    dirs::home_dir()
        .map(|h| h.join("code").join("claude-setup"))
        .unwrap_or_else(|| PathBuf::from("claude-setup"))
});
