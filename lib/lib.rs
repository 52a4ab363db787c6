//! `claude-setup-cli` library.

pub mod catalog;
pub mod commands;
pub mod constants;
pub mod error;
pub mod format;
pub mod generate;
pub mod handlers;
pub mod import;
pub mod output;
pub mod prompt;
pub mod selection;
pub mod styles;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use catalog::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use generate::*;
pub use handlers::*;
pub use import::*;
pub use output::*;
pub use selection::*;
