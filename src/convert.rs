//! End-to-end conversion: read the input, flatten it, write the output
//!
//! The whole input is validated before the writer is created, so a malformed
//! trade never produces an output file.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::flattener::{flatten, Flattener};
use crate::reader::load_json;
use crate::table::FlatTable;
use crate::writer::create_writer;

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Number of trades read from the input
    pub trades: usize,
    pub table: FlatTable,
    /// Where the table was written
    pub output: PathBuf,
}

pub fn convert(config: &Config) -> Result<Conversion> {
    info!("Reading trades from {:?}", config.input);
    let raw = load_json(&config.input)?;

    let flattener = Flattener::new(config.layout.clone());
    let trades = flattener
        .parse(&raw)
        .context(format!("Input {:?} does not have the expected trade layout", config.input))?;
    let table = FlatTable::from_rows(flatten(&trades));
    info!(
        "Flattened {} trades into {} rows with {} columns",
        trades.len(),
        table.len(),
        table.columns().len()
    );

    let mut writer = create_writer(config.output.format, &config.output.path);
    writer.write_table(&table)?;

    Ok(Conversion {
        trades: trades.len(),
        output: writer.path().to_path_buf(),
        table,
    })
}
