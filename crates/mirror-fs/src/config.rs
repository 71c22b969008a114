//! Format-agnostic configuration loading

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and deserializes
/// transparently.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let content = match extension.as_str() {
            "toml" | "json" | "yaml" | "yml" => {
                fs::read_to_string(path).map_err(|e| Error::io(path, e))?
            }
            _ => return Err(Error::UnsupportedFormat { extension }),
        };

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => {
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            _ => serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string())),
        }
    }
}
