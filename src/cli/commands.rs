//! CLI command implementations
//!
//! Each command opens the store, performs one operation, and closes it
//! again so every appended record is flushed (and synced, by default)
//! before the process exits. `read` and `stat` open the file read-only and
//! never sync.

use std::fs::{self, OpenOptions};
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use crate::observability::{log_event_with_fields, Event, Logger};
use crate::store::{Store, StoreConfig, StoreError};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_payload, write_response};

/// Load a store config from a JSON file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> CliResult<StoreConfig> {
    let Some(path) = path else {
        return Ok(StoreConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config: StoreConfig =
        serde_json::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    config.validate()?;

    let capacity = config.buffer_capacity.to_string();
    let shown = path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("buffer_capacity", capacity.as_str()), ("path", shown.as_str())],
    );

    Ok(config)
}

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let result = run_command(cli.command);

    if let Err(ref e) = result {
        let message = e.to_string();
        log_event_with_fields(
            Event::CommandFailed,
            &[("code", e.code()), ("message", message.as_str())],
        );
    }

    result
}

/// Run one command and write its response to stdout.
pub fn run_command(cmd: Command) -> CliResult<()> {
    let data = match cmd {
        Command::Append { file, config, data } => {
            let config = load_config(config.as_deref())?;
            let payload = match data {
                Some(data) => data.into_bytes(),
                None => read_payload()?,
            };
            append(&file, &config, &payload)?
        }
        Command::Read {
            file,
            position,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            read(&file, &config, position)?
        }
        Command::Stat { file } => stat(&file)?,
    };

    write_response(data)
}

/// Append one record to the store at `file`.
pub fn append(file: &Path, config: &StoreConfig, payload: &[u8]) -> CliResult<Value> {
    let store = open_store(file, config)?;
    let (bytes_written, position) = store.append(payload)?;

    let (written, pos) = (bytes_written.to_string(), position.to_string());
    log_event_with_fields(
        Event::StoreAppend,
        &[("bytes_written", written.as_str()), ("position", pos.as_str())],
    );

    close_store(store)?;

    Ok(json!({
        "bytes_written": bytes_written,
        "position": position,
    }))
}

/// Read the record at `position` from an existing store.
pub fn read(file: &Path, config: &StoreConfig, position: u64) -> CliResult<Value> {
    let store = open_read_only(file, config)?;
    let payload = store.read(position)?;

    let (length, pos) = (payload.len().to_string(), position.to_string());
    log_event_with_fields(
        Event::StoreRead,
        &[("length", length.as_str()), ("position", pos.as_str())],
    );

    close_store(store)?;

    Ok(json!({
        "position": position,
        "length": payload.len(),
        "payload": STANDARD.encode(&payload),
    }))
}

/// Report the size of an existing store.
pub fn stat(file: &Path) -> CliResult<Value> {
    let store = open_read_only(file, &StoreConfig::default())?;
    let size = store.size()?;
    close_store(store)?;

    Ok(json!({ "size": size }))
}

fn ensure_exists(file: &Path) -> CliResult<()> {
    if !file.exists() {
        return Err(CliError::FileNotFound(file.to_path_buf()));
    }
    Ok(())
}

fn open_store(file: &Path, config: &StoreConfig) -> CliResult<Store> {
    let store = Store::open_path(file, config)?;
    log_open(file, &store)?;

    if !config.sync_on_close {
        let path = file.display().to_string();
        Logger::warn("STORE_SYNC_ON_CLOSE_DISABLED", &[("path", path.as_str())]);
    }

    Ok(store)
}

fn open_read_only(file: &Path, config: &StoreConfig) -> CliResult<Store> {
    ensure_exists(file)?;

    let handle = OpenOptions::new()
        .read(true)
        .open(file)
        .map_err(|e| StoreError::open_failed("Failed to open store file", e))?;

    let config = StoreConfig {
        sync_on_close: false,
        ..config.clone()
    };
    let store = Store::with_config(handle, &config)?;
    log_open(file, &store)?;
    Ok(store)
}

fn log_open(file: &Path, store: &Store) -> CliResult<()> {
    let path = file.display().to_string();
    let size = store.size()?.to_string();

    log_event_with_fields(
        Event::StoreOpen,
        &[("path", path.as_str()), ("size", size.as_str())],
    );
    Ok(())
}

fn close_store(store: Store) -> CliResult<()> {
    let size = store.size()?.to_string();
    store.close()?;
    log_event_with_fields(Event::StoreClose, &[("size", size.as_str())]);
    Ok(())
}
