//! CLI module for commitlog
//!
//! Provides command-line access to a single store file:
//! - append: write one record, print its position
//! - read: print the record at a position (payload base64-encoded)
//! - stat: print the store size

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{append, load_config, read, run, run_command, stat};
pub use errors::{CliError, CliResult};
pub use io::{read_payload, write_response};
