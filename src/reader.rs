//! Input loading

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read and decode a JSON file, keeping object keys in file order
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .context(format!("Failed to read input file: {:?}", path))?;

    let value: Value = serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .context(format!("Failed to parse JSON from {:?}", path))?;

    info!("Loaded {} bytes from {:?}", content.len(), path);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_preserves_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.json");
        fs::write(
            &path,
            "\u{feff}[{\"Leg-Level Fields\": {\"Leg 2\": {}, \"Leg 1\": {}}}]",
        )
        .unwrap();

        let value = load_json(&path).unwrap();
        let legs: Vec<&String> = value[0]["Leg-Level Fields"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(legs, vec!["Leg 2", "Leg 1"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"Contract-Level Fields\": ").unwrap();

        let err = load_json(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
