//! Runtime configuration for a gacha session.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{PULL_COST, STARTING_CURRENCY};
use crate::error::ConfigError;
use crate::generator::GenerateOptions;
use crate::logging::TracingConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GachaConfig {
    pub pull_cost: u64,
    pub starting_currency: u64,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Directory for file-backed blobs; in-memory when absent
    pub data_dir: Option<PathBuf>,
    /// Consult stored title weights when naming Title items
    pub weighted_titles: bool,
    pub tracing: TracingConfig,
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self {
            pull_cost: PULL_COST,
            starting_currency: STARTING_CURRENCY,
            seed: None,
            data_dir: None,
            weighted_titles: false,
            tracing: TracingConfig::default(),
        }
    }
}

impl GachaConfig {
    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                let config: Self = serde_json::from_str(&text)?;
                info!(path = %path.display(), "config loaded");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            weighted_titles: self.weighted_titles,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}
