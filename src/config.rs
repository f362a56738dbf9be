use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::validate::ValidationMode;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub normalizer: NormalizerConfig,
}

/// Normalization pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub correction: CorrectionConfig,
    /// Validation mode: `basic` length/alphabet checks, or `strict`
    /// dictionary-membership.
    pub validation: ValidationMode,
}

/// Fuzzy spelling-correction thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Disable to leave misspelled tokens untouched.
    pub enabled: bool,
    /// Minimum Jaro-Winkler similarity for a match to be considered.
    pub score_threshold: f64,
    /// Corrections at or below this confidence (0..=100) never fire.
    pub confidence_floor: u32,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            score_threshold: 0.8,
            confidence_floor: 85,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/adresnik/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("adresnik").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
