//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rangewatch")]
#[command(author, version, about = "Trusted proxy IP ranges, fetched and refreshed from a provider")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "/etc/rangewatch/config.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the initial ranges and keep them refreshed until stopped
    Run,

    /// Fetch both source lists once and print every range
    Show,

    /// Check whether an address falls inside the provider's ranges
    Check {
        /// IP address to check
        ip: String,
    },

    /// Show version
    Version,
}
