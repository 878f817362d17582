//! Configuration for merging and output.
//!
//! Load order: `idmerge.toml` → environment variables → defaults.

use crate::error::MergeError;
use crate::merge::UnionStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILE: &str = "idmerge.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub merge: MergeConfig,
    pub output: OutputConfig,
}

/// Merge algorithm configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Which side absorbs the other on a union. Default: raw-length.
    pub strategy: UnionStrategy,
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent used for pretty JSON. Empty means compact output.
    pub indent: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
        }
    }
}

impl Config {
    /// Load config from `idmerge.toml` in `dir`, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(dir: &Path) -> Result<Self, MergeError> {
        let mut config = Self::load_file(dir)?;
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Load only the file layer, without environment overrides.
    pub fn load_file(dir: &Path) -> Result<Self, MergeError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| MergeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
            .map_err(|e| MergeError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `IDMERGE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), MergeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("IDMERGE_STRATEGY") {
            self.merge.strategy = v
                .parse()
                .map_err(|e| MergeError::Config(format!("IDMERGE_STRATEGY: {}", e)))?;
        }
        if let Some(v) = lookup("IDMERGE_INDENT") {
            // Shells make a literal tab awkward to pass.
            self.output.indent = v.replace("\\t", "\t");
        }
        Ok(())
    }
}
