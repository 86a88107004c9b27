//! Scanner Configuration
//!
//! Consensus and classifier settings stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scanner settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Voting settings
    pub consensus: ConsensusConfig,
    /// Field classification settings
    pub classifier: ClassifierConfig,
}

/// Voting settings for the consensus accumulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// A value is decided once its count exceeds this
    pub threshold: u32,
    /// Candidates at or below this confidence are ignored
    pub min_confidence: f32,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            threshold: 2,
            min_confidence: 0.1,
        }
    }
}

/// Word lists used by the field classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Issuer and promotional tokens; any string containing one is dropped
    pub skip_words: Vec<String>,
    /// Boilerplate that disqualifies a name match
    pub invalid_name_words: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let skip_words = [
            "mastercard", "jcb", "visa", "express", "bank", "card", "platinum", "reward",
        ];
        // These can appear next to dates, so they only disqualify names
        let invalid_name_words = ["expiration", "valid", "since", "from", "until", "month", "year"];

        Self {
            skip_words: skip_words.iter().map(|w| w.to_string()).collect(),
            invalid_name_words: invalid_name_words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cardscanner", "CardScanner")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<ScannerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: ScannerConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &ScannerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
