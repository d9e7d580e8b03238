//! CLI argument definitions using clap
//!
//! Commands:
//! - commitlog append --file <path> [--config <path>] [--data <string>]
//! - commitlog read --file <path> --position <offset> [--config <path>]
//! - commitlog stat --file <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// commitlog - append-only record store
#[derive(Parser, Debug)]
#[command(name = "commitlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append one record and print its position
    Append {
        /// Store file (created if missing)
        #[arg(long)]
        file: PathBuf,

        /// Path to a JSON store configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Record payload; read from stdin when omitted
        #[arg(long)]
        data: Option<String>,
    },

    /// Read the record starting at a byte offset
    Read {
        /// Store file
        #[arg(long)]
        file: PathBuf,

        /// Byte offset returned by a previous append
        #[arg(long)]
        position: u64,

        /// Path to a JSON store configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the store size in bytes
    Stat {
        /// Store file
        #[arg(long)]
        file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
