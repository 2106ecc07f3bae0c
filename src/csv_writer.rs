//! CSV file writing module
//!
//! Writes a header row (the table's column union) followed by one record per
//! flattened row.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::table::FlatTable;
use crate::writer::{write_atomically, Writer};

pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Writer for CsvWriter {
    fn write_table(&mut self, table: &FlatTable) -> Result<()> {
        write_atomically(&self.path, |file| {
            let mut wtr = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(file);

            if !table.columns().is_empty() {
                wtr.write_record(table.columns())
                    .context("Failed to write CSV header")?;
            }
            for (idx, row) in table.rows().iter().enumerate() {
                wtr.write_record(table.record(row))
                    .context(format!("Failed to write CSV row {}", idx))?;
            }

            wtr.flush().context("Failed to flush CSV writer")?;
            Ok(())
        })?;

        info!(
            "Wrote {} rows ({} columns) to {:?}",
            table.len(),
            table.columns().len(),
            self.path
        );
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
