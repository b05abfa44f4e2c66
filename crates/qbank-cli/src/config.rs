//! Configuration management for the CLI
//!
//! Client settings are layered as:
//! - Default values
//! - Configuration file (YAML/JSON)
//! - Environment variables
//! - Command-line arguments

use crate::error::{Error, Result};
use qbank_core::ClientConfig;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Client addresses and timeouts
    pub client: ClientSection,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSection,
}

/// Client settings; unset fields keep the library defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_timeout_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_parse_timeout_ms: Option<u64>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Runs before logging is initialized, so unreadable files are reported on
    /// stderr and skipped.
    pub fn load() -> Result<Self> {
        Ok(Self::load_first(&Self::default_config_paths(), &mut std::io::stderr()))
    }

    /// First readable file among `paths`; failures are written to `report`
    fn load_first(paths: &[PathBuf], report: &mut dyn Write) -> Self {
        for path in paths.iter().filter(|path| path.exists()) {
            match Self::from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    let _ = writeln!(
                        report,
                        "Warning: ignoring config file {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        Self::default()
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".qbank.yaml"), PathBuf::from(".qbank.json")];

        if let Some(config_dir) = dirs::config_dir() {
            let qbank_dir = config_dir.join("qbank");
            paths.push(qbank_dir.join("config.yaml"));
            paths.push(qbank_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".qbank.yaml"));
        }

        paths
    }

    /// Where `config init` writes by default
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qbank").join("config.yaml"))
    }

    /// Resolve the client settings.
    ///
    /// `env` looks up environment variables; flags win over everything else.
    pub fn client_config<F>(
        &self,
        env: F,
        local_url: Option<&str>,
        market_url: Option<&str>,
    ) -> ClientConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();
        let section = &self.client;

        if let Some(url) = &section.local_base_url {
            config.local_base_url = url.clone();
        }
        if let Some(url) = &section.market_base_url {
            config.market_base_url = url.clone();
        }
        if let Some(timeout) = section.default_timeout_ms {
            config.default_timeout_ms = timeout;
        }
        if let Some(timeout) = section.file_parse_timeout_ms {
            config.file_parse_timeout_ms = timeout;
        }

        let mut config = config.with_overrides(env);

        if let Some(url) = local_url {
            config.local_base_url = url.to_string();
        }
        if let Some(url) = market_url {
            config.market_base_url = url.to_string();
        }
        config
    }

    /// A starter file with every client setting spelled out
    pub fn starter() -> Self {
        let defaults = ClientConfig::default();
        Self {
            client: ClientSection {
                local_base_url: Some(defaults.local_base_url),
                market_base_url: Some(defaults.market_base_url),
                default_timeout_ms: Some(defaults.default_timeout_ms),
                file_parse_timeout_ms: Some(defaults.file_parse_timeout_ms),
            },
            ..Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}
