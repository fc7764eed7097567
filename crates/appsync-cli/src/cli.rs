//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// Sync a local work tree with a remote application object store
#[derive(Parser, Debug)]
#[command(name = "appsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a configuration template and the work directory tree
    ///
    /// Writes appsyncconfig.json with placeholder credentials if absent and
    /// creates the three category directories.
    Init,

    /// Push local changes to the remote store
    Upload,

    /// Replace the local tree with the remote project's current state
    Download,
}
