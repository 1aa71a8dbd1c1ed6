//! Application configuration
//!
//! Settings come from an optional TOML file and are then overridden by
//! `SURVEY_*` environment variables.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::auth::AdminConfig;
use crate::error::SurveyError;
use crate::storage::StorageConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "survey.toml";

/// Everything a survey host needs to start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Log filter used when no `-v` flag is given
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SurveyConfig {
    /// Load from `path` (or `survey.toml`), then apply the environment
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SurveyError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            SurveyError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Override fields from `SURVEY_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var("SURVEY_LOG_LEVEL") {
            self.log_level = Some(level);
        }
        if let Ok(host) = std::env::var("SURVEY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SURVEY_PORT") {
            self.server.port = port.parse().map_err(|_| {
                SurveyError::config(format!("SURVEY_PORT is not a valid port: {}", port))
            })?;
        }
        if let Ok(username) = std::env::var("SURVEY_ADMIN_USERNAME") {
            self.admin.username = username;
        }
        if let Ok(password) = std::env::var("SURVEY_ADMIN_PASSWORD") {
            self.admin.password = Some(password).filter(|p| !p.is_empty());
        }
        self.storage.apply_env();
        Ok(())
    }
}

/// Process-level settings derived from the command line
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Level from the config file, used at verbosity 0
    pub configured_level: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            configured_level: None,
        }
    }

    pub fn with_configured_level(mut self, level: Option<String>) -> Self {
        self.configured_level = level;
        self
    }

    /// Get the log filter based on verbosity
    pub fn log_level(&self) -> String {
        match self.verbose {
            0 => self
                .configured_level
                .clone()
                .unwrap_or_else(|| "info".to_string()),
            1 => "debug".to_string(),
            2 => "trace".to_string(),
            _ => "trace,hyper=debug,tower=debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BackendType;
    use std::time::Duration;

    #[test]
    fn test_parse_full_config() {
        let config: SurveyConfig = toml::from_str(
            r#"
log_level = "warn"

[server]
host = "0.0.0.0"
port = 8080

[storage]
backend = "file"

[storage.file]
base_dir = "/var/lib/survey"

[admin]
username = "chef"
password = "hunter2"
session_ttl = "12h"
"#,
        )
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.storage.backend, BackendType::File);
        assert_eq!(
            config.storage.file.base_dir,
            PathBuf::from("/var/lib/survey")
        );
        assert_eq!(config.admin.username, "chef");
        assert_eq!(config.admin.password.as_deref(), Some("hunter2"));
        assert_eq!(config.admin.session_ttl, Duration::from_secs(12 * 3600));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: SurveyConfig = toml::from_str("").unwrap();
        assert_eq!(config, SurveyConfig::default());
        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert!(config.admin.password.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_a_config_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let error = SurveyConfig::from_file(&temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<SurveyError>(),
            Some(SurveyError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("survey.toml");
        std::fs::write(&path, "[server]\nport = \"not a number\"").unwrap();
        let error = SurveyConfig::from_file(&path).unwrap_err();
        assert!(error.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(
            AppConfig::new(0)
                .with_configured_level(Some("warn".to_string()))
                .log_level(),
            "warn"
        );
        assert_eq!(
            AppConfig::new(1)
                .with_configured_level(Some("warn".to_string()))
                .log_level(),
            "debug"
        );
        assert_eq!(AppConfig::new(5).log_level(), "trace,hyper=debug,tower=debug");
    }
}
