//! CLI subcommand implementations.

pub mod html;
pub mod status;
pub mod table;
mod util;
pub mod watch;
