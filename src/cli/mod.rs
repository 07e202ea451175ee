//! CLI command handlers
//!
//! Each subcommand is implemented in its own module.

pub mod analyze;
pub mod canonicalize;
pub mod helpers;
pub mod index;
pub mod profile;
