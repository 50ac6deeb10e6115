//! World document load/save
//!
//! The document is a flat JSON object with one record per entity:
//! `{"robot": {"x": .., "y": .., "direction": ..}, "goal": {}}`.
//! No versioning and no validation beyond what each record needs.
//! Saves go through a temporary file that is renamed over the target.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

pub fn load(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let document = serde_json::from_str(&json)?;
    log::info!("Loaded world from {}", path.display());
    Ok(document)
}

pub fn save(path: impl AsRef<Path>, document: &Value) -> Result<()> {
    let path = path.as_ref();
    let tmp = path.with_extension("tmp");

    fs::write(&tmp, serde_json::to_string_pretty(document)?)?;
    fs::rename(&tmp, path)?;

    log::info!("World saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        let document = serde_json::json!({
            "robot": {"x": 10.0, "y": 20.0, "direction": 90.0},
            "goal": {}
        });

        save(&path, &document).unwrap();
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(load(&path).unwrap(), document);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path().join("missing.json")).is_err());
    }
}
