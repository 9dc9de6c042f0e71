//! CLI command handlers module
//!
//! - pipeline: preprocessing and scoring runs
//! - init: database initialization and run history
//! - info: configuration display

pub mod info;
pub mod init;
pub mod pipeline;

pub use info::*;
pub use init::*;
pub use pipeline::*;
