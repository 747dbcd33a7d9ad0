//! Activity countdown dashboard CLI library.
//!
//! This crate provides the CLI interface, configuration, presenters and the
//! refresh loop for the dashboard.

mod cli;
pub mod commands;
mod config;
pub mod render;
pub mod snapshot;
mod source;
#[cfg(test)]
mod testing;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use source::build_source;
