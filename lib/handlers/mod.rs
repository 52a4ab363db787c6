//! Command handlers.

mod project;
mod remote;

pub use project::*;
pub use remote::*;
