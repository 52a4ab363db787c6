//! Remote synchronization handlers.
//!
//! Synchronization against the remote setup repository is not implemented
//! yet; these handlers only announce that and exit cleanly.

use colored::Colorize;

use crate::error::SetupResult;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// `claude-setup sync`. Not implemented yet.
pub fn sync() -> SetupResult<()> {
    print_unimplemented("Syncing with GitHub");
    Ok(())
}

/// `claude-setup upload`. Not implemented yet.
pub fn upload() -> SetupResult<()> {
    print_unimplemented("Uploading to GitHub");
    Ok(())
}

/// `claude-setup download`. Not implemented yet.
pub fn download() -> SetupResult<()> {
    print_unimplemented("Downloading from GitHub");
    Ok(())
}

fn print_unimplemented(action: &str) {
    println!();
    println!("  {} {}...", "·".bright_yellow(), action);
    println!("  {}", "Not yet implemented.".dimmed());
    println!();
}
