use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::errors::ConfigError;
use super::load::LoadConfig;
use super::logging::LoggingConfig;
use super::target::TargetConfig;
use crate::DispatchTarget;

const LOCAL_CONFIG_PATH: &str = "dnsblast.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dnsblast/config.toml";

/// Main configuration structure for dnsblast
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolver under test
    #[serde(default)]
    pub target: TargetConfig,

    /// Names, repeat count, concurrency cap
    #[serde(default)]
    pub load: LoadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsblast.toml in current directory
    /// 3. /etc/dnsblast/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.host {
            self.target.host = host;
        }
        if let Some(port) = overrides.port {
            self.target.port = port;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.target.timeout_ms = timeout_ms;
        }
        if let Some(names) = overrides.names {
            if !names.is_empty() {
                self.load.names = names;
            }
        }
        if let Some(repeat) = overrides.repeat {
            self.load.repeat = repeat;
        }
        if let Some(max) = overrides.max_concurrency {
            self.load.max_concurrency = Some(max);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Target host cannot be empty".to_string(),
            ));
        }
        if self.target.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Target timeout must be greater than 0".to_string(),
            ));
        }
        if self.load.names.is_empty() {
            return Err(ConfigError::Validation("No names configured".to_string()));
        }
        if self.load.repeat == 0 {
            return Err(ConfigError::Validation(
                "Repeat count must be at least 1".to_string(),
            ));
        }
        if self.load.max_concurrency == Some(0) {
            return Err(ConfigError::Validation(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Destination for every query of the run
    pub fn dispatch_target(&self) -> DispatchTarget {
        DispatchTarget::new(
            self.target.host.as_str(),
            self.target.port,
            Duration::from_millis(self.target.timeout_ms),
        )
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_ms: Option<u64>,
    pub names: Option<Vec<String>>,
    pub repeat: Option<u32>,
    pub max_concurrency: Option<usize>,
    pub log_level: Option<String>,
}
