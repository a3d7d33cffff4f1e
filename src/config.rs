//! Optional startup configuration read from `cereal-dash.json`.
//!
//! ```json
//! { "dataset_path": "base_finale_céréales.xlsx", "locale": "fr" }
//! ```
//!
//! Every field is optional. A missing file means defaults; a file that
//! cannot be parsed is reported and ignored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

pub const CONFIG_FILE: &str = "cereal-dash.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset opened at startup. Without it the user picks a file.
    pub dataset_path: Option<PathBuf>,
    pub locale: Locale,
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Read `path` if it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}
