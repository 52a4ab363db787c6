//! Error types for claude-setup-cli.

use std::path::PathBuf;

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for claude-setup-cli operations.
pub type SetupResult<T> = Result<T, SetupError>;

/// Error type for claude-setup-cli operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Project directory does not exist.
    #[error("Project path does not exist: {}", .0.display())]
    ProjectNotFound(PathBuf),

    /// Setup root holding components and MCP manifests does not exist.
    #[error("Setup directory not found: {}", .0.display())]
    SetupRootNotFound(PathBuf),

    /// Backing up the existing artifact failed; the artifact was left untouched.
    #[error("Failed to back up existing {}: {source}", .path.display())]
    BackupFailed {
        /// The artifact that could not be backed up.
        path: PathBuf,
        /// The underlying copy error.
        source: std::io::Error,
    },

    /// Invalid per-server MCP manifest.
    #[error("Invalid MCP server config for '{server}': {reason}")]
    InvalidServerConfig { server: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Walkdir error.
    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// User cancelled operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}
