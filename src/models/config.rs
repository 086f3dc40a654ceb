// src/models/config.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use super::standard_sizes::DEFAULT_STANDARD_SIZES;
use crate::svg::constants::DEFAULT_FONT_FAMILY;

/// An explicit mapping of one detected effective size to a standard size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOverride {
    pub from: f64,
    pub to: f64,
}

/// Standardization settings, loadable from a JSON file.
///
/// ```json
/// { "standardSizes": [10, 12, 18], "fontFamily": "Inter", "overrides": [{ "from": 11, "to": 12 }] }
/// ```
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardizeConfig {
    pub standard_sizes: Vec<f64>,
    pub font_family: String,
    pub overrides: Vec<SizeOverride>,
}

impl Default for StandardizeConfig {
    fn default() -> Self {
        StandardizeConfig {
            standard_sizes: DEFAULT_STANDARD_SIZES.to_vec(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            overrides: Vec::new(),
        }
    }
}

impl StandardizeConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
