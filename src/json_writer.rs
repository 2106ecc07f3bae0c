//! JSON Lines writing module
//!
//! Writes one JSON object per flattened row, keys in row assembly order.
//! Missing columns are omitted rather than written as null.

use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::table::FlatTable;
use crate::writer::{write_atomically, Writer};

pub struct JsonLinesWriter {
    path: PathBuf,
}

impl JsonLinesWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Writer for JsonLinesWriter {
    fn write_table(&mut self, table: &FlatTable) -> Result<()> {
        write_atomically(&self.path, |file| {
            let mut out = BufWriter::new(file);
            for row in table.rows() {
                let json_line = serde_json::to_string(row)
                    .context("Failed to serialize row to JSON")?;
                writeln!(out, "{}", json_line)
                    .context("Failed to write JSON line to file")?;
            }
            out.flush().context("Failed to flush JSON lines")?;
            Ok(())
        })?;

        info!("Wrote {} rows to {:?}", table.len(), self.path);
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
