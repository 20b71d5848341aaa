pub mod doctor;

use clap::{Parser, Subcommand};

/// Mnemosyne — a persistent memory layer for AI coding agents.
#[derive(Debug, Parser)]
#[command(name = "mnemosyne", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the memory server (default when no subcommand is given).
    Serve,
    /// Run diagnostic checks against the configured graph store.
    Doctor,
    /// Print the version and exit.
    Version,
}
