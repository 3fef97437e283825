use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ExportFormat;

/// Configuration for specdoc
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Line prefixes never taken for a sub-clause heading, for running text
    /// that starts with a clause number
    pub heading_exceptions: Vec<String>,

    /// Sections whose pages have no paragraph numbering margin
    pub flat_margin_sections: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ExportFormat,
}

impl Config {
    /// Load config from the config directory
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        // Return default config if no file found
        Ok(Config::default())
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the config directory
    pub fn save(&self) -> Result<Option<PathBuf>> {
        let Some(config_path) = Self::get_config_path() else {
            return Ok(None);
        };
        self.save_to(&config_path)?;
        Ok(Some(config_path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("specdoc").join("config.toml"))
    }

    /// Initialize default config file
    pub fn init_default() -> Result<Option<PathBuf>> {
        Config::default().save()
    }

    /// Whether pages of `section` are parsed without numbering margin
    pub fn is_flat_margin(&self, section: &str) -> bool {
        self.parser
            .flat_margin_sections
            .iter()
            .any(|name| name == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [parser]
            heading_exceptions = ["6.7.3.1 through"]
            "#,
        )
        .unwrap();
        assert_eq!(config.parser.heading_exceptions, vec!["6.7.3.1 through"]);
        assert!(config.parser.flat_margin_sections.is_empty());
        assert_eq!(config.output.format, ExportFormat::Json);
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut config = Config::default();
        config.parser.flat_margin_sections = vec!["cover".to_string()];
        config.output.format = ExportFormat::Outline;

        let path = std::env::temp_dir().join(format!("specdoc-config-{}.toml", std::process::id()));
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
        assert!(loaded.is_flat_margin("cover"));
        assert!(!loaded.is_flat_margin("body"));
    }
}
