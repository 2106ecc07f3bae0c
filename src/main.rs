//! Trade Flattener
//!
//! Reads a JSON array of trade records and writes one flat row per leg,
//! then prints a preview of the output and a short conversion report.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use trade_flattener::{convert, preview_csv, preview_table, Config, Summary, WriterType};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "trade-flattener")]
#[command(about = "Flatten nested trade records into one row per leg", long_about = None)]
struct Args {
    /// Path to an optional configuration YAML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON file with the trade records
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Destination file for the flattened rows
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<WriterType>,

    /// Number of rows to preview after writing (0 disables the preview)
    #[arg(short, long, value_name = "ROWS")]
    preview: Option<usize>,

    /// Skip the conversion report
    #[arg(long)]
    no_summary: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    if let Err(e) = run(&config) {
        error!("Conversion failed: {:#}", e);
        return Err(e);
    }

    info!("Conversion completed successfully!");
    Ok(())
}

/// Filter from a `RUST_LOG`-style directive string, `info` when unset or invalid
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Load the config file (if any) and apply command-line overrides
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Config::from_file(path).context("Failed to load configuration")?
        }
        None => Config::default(),
    };

    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(rows) = args.preview {
        config.preview_rows = rows;
    }
    if args.no_summary {
        config.summary.enabled = false;
    }

    Ok(config)
}

fn run(config: &Config) -> Result<()> {
    let conversion = convert(config)?;
    println!("Output saved as: {}", conversion.output.display());

    if config.preview_rows > 0 {
        let preview = match config.output.format {
            WriterType::Csv => preview_csv(&conversion.output, config.preview_rows)?,
            WriterType::Jsonl => preview_table(&conversion.table, config.preview_rows),
        };
        println!("\nPreview of first {} rows:", config.preview_rows);
        println!("{}", preview);
    }

    if config.summary.enabled {
        let summary = Summary::collect(
            conversion.trades,
            &conversion.table,
            &config.summary.distinct_columns,
        );
        println!("\n{}", summary);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("flattener.yaml");
        fs::write(
            &config_path,
            r#"
input: "from_file.json"
output:
  path: "from_file.csv"
  format: "csv"
preview_rows: 5
layout:
  leg_group: "Legs"
"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "trade-flattener",
            "--config",
            config_path.to_str().unwrap(),
            "--input",
            "cli.json",
            "--output",
            "cli.jsonl",
            "--format",
            "jsonl",
            "--preview",
            "0",
            "--no-summary",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.input, PathBuf::from("cli.json"));
        assert_eq!(config.output.path, PathBuf::from("cli.jsonl"));
        assert_eq!(config.output.format, WriterType::Jsonl);
        assert_eq!(config.preview_rows, 0);
        assert!(!config.summary.enabled);
        // Values without a flag come from the file
        assert_eq!(config.layout.leg_group, "Legs");
    }

    #[test]
    fn test_config_file_used_without_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("flattener.yaml");
        fs::write(&config_path, "input: \"from_file.json\"\npreview_rows: 3\n").unwrap();

        let args =
            Args::try_parse_from(["trade-flattener", "-c", config_path.to_str().unwrap()]).unwrap();
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.input, PathBuf::from("from_file.json"));
        assert_eq!(config.preview_rows, 3);
        assert!(config.summary.enabled);
    }

    #[test]
    fn test_log_filter_honours_directives() {
        use tracing::level_filters::LevelFilter;

        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("trade_flattener=loud")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_defaults_without_config_file() {
        let args = Args::try_parse_from(["trade-flattener"]).unwrap();
        assert_eq!(resolve_config(&args).unwrap(), Config::default());
    }
}
