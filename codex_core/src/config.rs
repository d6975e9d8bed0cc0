//! Engine configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lore_model::DEFAULT_WORLD;

/// Default hard cap on top-level continents.
pub const DEFAULT_MAX_CONTINENTS: usize = 4;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for the merge engine. Absent keys keep their defaults; unknown
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodexConfig {
    /// Maximum number of top-level continents kept by geographic
    /// normalization; excess entries are truncated in insertion order.
    pub max_continents: usize,

    /// World name filled into records that leave theirs blank.
    pub world: String,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            max_continents: DEFAULT_MAX_CONTINENTS,
            world: DEFAULT_WORLD.to_string(),
        }
    }
}

impl CodexConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }
}
