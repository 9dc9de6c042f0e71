pub mod classify;
pub mod cli;
pub mod config;
pub mod correlation;
pub mod database;
pub mod errors;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod preprocess;
pub mod scoring;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod errors_tests;
#[cfg(test)]
pub mod tests;

pub use config::AppConfig;
pub use errors::*;
