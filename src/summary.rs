//! Conversion report

use std::collections::HashSet;
use std::fmt;

use crate::table::{render_cell, FlatTable};

/// How many leading column names the report lists
pub const LEADING_COLUMNS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub trades: usize,
    pub rows: usize,
    pub columns: usize,
    pub leading_columns: Vec<String>,
    /// Column name -> number of distinct non-null values, `None` if the
    /// column does not appear in the output
    pub distinct: Vec<(String, Option<usize>)>,
}

impl Summary {
    pub fn collect(trades: usize, table: &FlatTable, distinct_columns: &[String]) -> Self {
        let distinct = distinct_columns
            .iter()
            .map(|column| (column.clone(), count_distinct(table, column)))
            .collect();

        Self {
            trades,
            rows: table.len(),
            columns: table.columns().len(),
            leading_columns: table
                .columns()
                .iter()
                .take(LEADING_COLUMNS)
                .cloned()
                .collect(),
            distinct,
        }
    }
}

fn count_distinct(table: &FlatTable, column: &str) -> Option<usize> {
    if !table.columns().iter().any(|c| c == column) {
        return None;
    }

    let values: HashSet<String> = table
        .rows()
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|value| !value.is_null())
        .map(render_cell)
        .collect();
    Some(values.len())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} trades ({} legs) into {} columns",
            self.trades, self.rows, self.columns
        )?;

        if !self.leading_columns.is_empty() {
            writeln!(f, "First column names:")?;
            for (idx, column) in self.leading_columns.iter().enumerate() {
                writeln!(f, "  {}. {}", idx + 1, column)?;
            }
        }

        for (column, count) in &self.distinct {
            match count {
                Some(count) => writeln!(f, "Unique {}: {}", column, count)?,
                None => writeln!(f, "Unique {}: column not present", column)?,
            }
        }
        Ok(())
    }
}
