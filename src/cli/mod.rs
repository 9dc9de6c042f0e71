//! CLI module for the `trendrank` binary
//!
//! - Command line argument parsing
//! - Command handlers (organized by domain in handlers/ subdirectory)
//! - Output formatting

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::*;
pub use handlers::*;
pub use output::*;
