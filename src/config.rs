//! Configuration module for the trade flattener
//!
//! Every field has a default, so the YAML file is optional and may set only
//! the values it cares about. Command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::writer::WriterType;

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file for the flattened rows
    pub path: PathBuf,
    /// Output format: "csv" or "jsonl"
    pub format: WriterType,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("trade_data_flattened.csv"),
            format: WriterType::Csv,
        }
    }
}

/// Names of the field groups inside each trade object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Key holding the contract-level fields
    pub contract_group: String,
    /// Key holding the leg-level fields (leg identifier -> fields)
    pub leg_group: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            contract_group: "Contract-Level Fields".to_string(),
            leg_group: "Leg-Level Fields".to_string(),
        }
    }
}

/// Conversion report settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummaryConfig {
    pub enabled: bool,
    /// Flattened columns whose distinct values are counted in the report
    pub distinct_columns: Vec<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            distinct_columns: vec![
                "Contract_Trade_ID".to_string(),
                "Contract_Counterparty".to_string(),
            ],
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the array of trade records
    pub input: PathBuf,
    pub output: OutputConfig,
    /// Number of rows shown in the console preview (0 disables it)
    pub preview_rows: usize,
    pub layout: LayoutConfig,
    pub summary: SummaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("trade_data.json"),
            output: OutputConfig::default(),
            preview_rows: 5,
            layout: LayoutConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config YAML")?;

        Ok(config)
    }
}
