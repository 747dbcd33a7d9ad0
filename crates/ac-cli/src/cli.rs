//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Activity countdown dashboard.
///
/// Reads scheduled activities from a spreadsheet and shows, per activity,
/// whether it is on track or delayed and how long remains.
#[derive(Debug, Parser)]
#[command(name = "ac", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the Main, Parallel and Delay sections once.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render the dashboard as a standalone HTML page.
    Html {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show every activity as a table.
    Table,

    /// Refresh the dashboard on a fixed interval until interrupted.
    Watch {
        /// Seconds between refreshes (defaults to `refresh_secs` from config).
        #[arg(short, long)]
        interval: Option<u64>,

        /// Rewrite this HTML file on every refresh instead of printing text.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stop after this many refresh cycles.
        #[arg(long)]
        cycles: Option<u64>,
    },
}
