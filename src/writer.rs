//! Writer trait and types
//!
//! This module defines the common interface for the output backends and the
//! write-then-rename helper they share, so a failed run never leaves a
//! half-written output file behind.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::csv_writer::CsvWriter;
use crate::json_writer::JsonLinesWriter;
use crate::table::FlatTable;

/// Flattened row - column name to value, in assembly order
pub type FlatRow = IndexMap<String, Value>;

/// Writer type selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WriterType {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// Common interface for table writers
pub trait Writer {
    /// Write the whole table to the configured destination
    fn write_table(&mut self, table: &FlatTable) -> Result<()>;

    /// Destination path
    fn path(&self) -> &Path;
}

/// Build the writer for the requested output format
pub fn create_writer<P: AsRef<Path>>(writer_type: WriterType, path: P) -> Box<dyn Writer> {
    let path = path.as_ref().to_path_buf();
    match writer_type {
        WriterType::Csv => Box::new(CsvWriter::new(path)),
        WriterType::Jsonl => Box::new(JsonLinesWriter::new(path)),
    }
}

/// Generate a unique temporary path next to the final destination
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .context(format!("Output path has no file name: {:?}", path))?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("Failed to get timestamp")?
        .as_nanos();
    let pid = std::process::id();

    Ok(path.with_file_name(format!("{}.{}.{}.tmp", filename, pid, timestamp)))
}

/// Write a file through a temporary sibling and rename it into place.
///
/// If `write` fails the temporary file is removed and the destination is left
/// untouched.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let temp_path = temp_path_for(path)?;
    let mut file = File::create(&temp_path)
        .context(format!("Failed to create temp file: {:?}", temp_path))?;

    let written = write(&mut file).and_then(|_| {
        file.sync_all()
            .context(format!("Failed to sync temp file: {:?}", temp_path))
    });
    drop(file);

    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(&temp_path) {
            debug!("Failed to remove temp file {:?}: {}", temp_path, remove_err);
        }
        return Err(e);
    }

    fs::rename(&temp_path, path)
        .context(format!("Failed to move {:?} to {:?}", temp_path, path))?;
    debug!("Moved {:?} into place at {:?}", temp_path, path);

    Ok(())
}
