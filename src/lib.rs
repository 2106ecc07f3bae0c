//! Trade Flattener Library
//!
//! This library converts nested trade records (contract-level fields plus
//! named leg-level field groups) into flat rows, one per leg, and writes
//! them as CSV or JSON Lines.

pub mod config;
pub mod error;
pub mod flattener;
pub mod table;
pub mod reader;
pub mod writer;
pub mod csv_writer;
pub mod json_writer;
pub mod preview;
pub mod summary;
pub mod convert;

// Re-export commonly used types
pub use config::{Config, LayoutConfig, OutputConfig, SummaryConfig};
pub use error::MalformedInputError;
pub use flattener::{column_name, flatten, flatten_trade, parse_trades, Flattener, TradeRecord};
pub use table::FlatTable;
pub use reader::load_json;
pub use writer::{create_writer, FlatRow, Writer, WriterType};
pub use csv_writer::CsvWriter;
pub use json_writer::JsonLinesWriter;
pub use preview::{preview_csv, preview_table};
pub use summary::Summary;
pub use convert::{convert, Conversion};
