//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.hrboard.toml` files.

use crate::data::DATASET_URL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dataset source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Dataset source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Dataset URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Cache file for the raw CSV: written after a successful fetch and
    /// used as a fallback when the fetch fails. None disables caching.
    #[serde(default)]
    pub cache_file: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            cache_file: None,
        }
    }
}

fn default_url() -> String {
    DATASET_URL.to_string()
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Histogram grid canvas width in logical units.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Histogram grid canvas height in logical units.
    #[serde(default = "default_height")]
    pub height: usize,

    /// Opacity of the overlaid histogram bars.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            width: default_width(),
            height: default_height(),
            opacity: default_opacity(),
        }
    }
}

fn default_output() -> String {
    "hr_dashboard.html".to_string()
}

fn default_width() -> usize {
    1200
}

fn default_height() -> usize {
    800
}

fn default_opacity() -> f64 {
    0.75
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".hrboard.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings. This
    /// method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.url {
            self.source.url = url.clone();
        }
        if let Some(ref cache) = args.cache {
            self.source.cache_file = Some(cache.display().to_string());
        }
        if let Some(ref output) = args.output {
            self.report.output = output.display().to_string();
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.url, DATASET_URL);
        assert_eq!(config.report.output, "hr_dashboard.html");
        assert_eq!(config.report.width, 1200);
        assert_eq!(config.report.height, 800);
        assert!(config.source.cache_file.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[source]
url = "https://example.com/hr.csv"
cache_file = ".hr_cache.csv"

[report]
output = "custom.html"
width = 1000

[general]
verbose = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.source.url, "https://example.com/hr.csv");
        assert_eq!(config.source.cache_file.as_deref(), Some(".hr_cache.csv"));
        assert_eq!(config.report.output, "custom.html");
        assert_eq!(config.report.width, 1000);
        // Unset keys keep their defaults.
        assert_eq!(config.report.height, 800);
        assert!(config.general.verbose);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[general]"));
    }
}
