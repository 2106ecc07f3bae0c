//! Flat table built from flattened rows
//!
//! The header is the union of every row's columns in first-seen order. Rows
//! that lack a column render an empty cell for it.

use indexmap::IndexSet;
use serde_json::Value;

use crate::writer::FlatRow;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<FlatRow>,
}

impl FlatTable {
    pub fn from_rows(rows: Vec<FlatRow>) -> Self {
        let mut columns: IndexSet<String> = IndexSet::new();
        for row in &rows {
            columns.extend(row.keys().cloned());
        }

        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of `row` in header order
    pub fn record(&self, row: &FlatRow) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| row.get(column).map(render_cell).unwrap_or_default())
            .collect()
    }
}

/// Render a value as a single text cell.
///
/// Strings are written raw, numbers and booleans in their JSON form, null as
/// an empty cell, and arrays/objects as compact JSON.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> FlatRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_header_is_union_in_first_seen_order() {
        let table = FlatTable::from_rows(vec![
            row(&[("Contract_Trade_ID", json!("T1")), ("Leg_Number", json!("Leg 1")), ("Leg_Rate", json!(0.05))]),
            row(&[("Contract_Trade_ID", json!("T1")), ("Leg_Number", json!("Leg 2")), ("Leg_Spread", json!(12))]),
            row(&[("Contract_Trade_ID", json!("T2")), ("Contract_Book", json!("RATES")), ("Leg_Number", json!("Leg 1"))]),
        ]);

        assert_eq!(
            table.columns(),
            &["Contract_Trade_ID", "Leg_Number", "Leg_Rate", "Leg_Spread", "Contract_Book"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.record(&table.rows()[0]), vec!["T1", "Leg 1", "0.05", "", ""]);
        assert_eq!(table.record(&table.rows()[1]), vec!["T1", "Leg 2", "", "12", ""]);
        assert_eq!(table.record(&table.rows()[2]), vec!["T2", "Leg 1", "", "", "RATES"]);
    }

    #[test]
    fn test_empty_table() {
        let table = FlatTable::from_rows(Vec::new());
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_render_cell() {
        assert_eq!(render_cell(&json!("Leg 1")), "Leg 1");
        assert_eq!(render_cell(&json!(0.05)), "0.05");
        assert_eq!(render_cell(&json!(-0.03)), "-0.03");
        assert_eq!(render_cell(&json!(1000000)), "1000000");
        assert_eq!(render_cell(&json!(true)), "true");
        assert_eq!(render_cell(&Value::Null), "");
        assert_eq!(render_cell(&json!([1, "a"])), r#"[1,"a"]"#);
        assert_eq!(render_cell(&json!({"ccy": "USD"})), r#"{"ccy":"USD"}"#);
    }

    #[test]
    fn test_render_cell_keeps_source_number_text() {
        let values: Vec<Value> =
            serde_json::from_str("[12345678901234567890123, 1.50, -0.0300]").unwrap();
        let cells: Vec<String> = values.iter().map(render_cell).collect();
        assert_eq!(cells, vec!["12345678901234567890123", "1.50", "-0.0300"]);
    }
}
