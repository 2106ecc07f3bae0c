//! Console preview of flattened output
//!
//! Renders the first rows as a right-aligned text table with a leading row
//! index, similar to a dataframe printout.

use anyhow::{Context, Result};
use std::path::Path;

use crate::table::FlatTable;

/// Separator between rendered columns
const GAP: &str = "  ";

/// Read a written CSV back and render at most `num_rows` of its rows
pub fn preview_csv<P: AsRef<Path>>(path: P, num_rows: usize) -> Result<String> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV for preview: {:?}", path))?;

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(String::from)
        .collect();

    let mut records = Vec::new();
    for result in rdr.records().take(num_rows) {
        let record = result.context(format!("Failed to read CSV record from {:?}", path))?;
        records.push(record.iter().map(String::from).collect());
    }

    Ok(render_table(&headers, &records))
}

/// Render at most `num_rows` rows of an in-memory table
pub fn preview_table(table: &FlatTable, num_rows: usize) -> String {
    let records: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(num_rows)
        .map(|row| table.record(row))
        .collect();
    render_table(table.columns(), &records)
}

pub fn render_table(headers: &[String], records: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return "Empty table".to_string();
    }

    let index_width = records
        .len()
        .checked_sub(1)
        .map(|last| last.to_string().len())
        .unwrap_or(0);

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            records
                .iter()
                .filter_map(|record| record.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(records.len() + 1);

    let mut line = format!("{:>width$}", "", width = index_width);
    for (header, width) in headers.iter().zip(&widths) {
        line.push_str(GAP);
        line.push_str(&format!("{:>width$}", header, width = *width));
    }
    lines.push(line);

    for (idx, record) in records.iter().enumerate() {
        let mut line = format!("{:>width$}", idx, width = index_width);
        for (col, width) in widths.iter().enumerate() {
            let cell = record.get(col).map(String::as_str).unwrap_or("");
            line.push_str(GAP);
            line.push_str(&format!("{:>width$}", cell, width = *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}
