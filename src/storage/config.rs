//! Storage configuration types and utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// JSON files on disk (default)
    #[default]
    File,
    /// Process memory, lost on exit
    Memory,
}

impl BackendType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "file" => Some(Self::File),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Main storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend type
    #[serde(default)]
    pub backend: BackendType,

    /// File backend settings
    #[serde(default)]
    pub file: FileConfig,
}

/// File storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Directory holding `responses.json` and `comments.json`
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Write indented JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            pretty: true,
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_true() -> bool {
    true
}

impl StorageConfig {
    /// In-memory storage, used by tests and throwaway servers
    pub fn memory() -> Self {
        Self {
            backend: BackendType::Memory,
            ..Default::default()
        }
    }

    /// File storage rooted at `base_dir`
    pub fn file(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendType::File,
            file: FileConfig {
                base_dir: base_dir.into(),
                ..Default::default()
            },
        }
    }

    /// Override fields from `SURVEY_STORAGE_*` environment variables
    pub fn apply_env(&mut self) {
        if let Some(backend) = std::env::var("SURVEY_STORAGE_TYPE")
            .ok()
            .and_then(|value| BackendType::parse(&value))
        {
            self.backend = backend;
        }

        if let Ok(dir) = std::env::var("SURVEY_STORAGE_DIR") {
            self.file.base_dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_type_parse() {
        assert_eq!(BackendType::parse("FILE"), Some(BackendType::File));
        assert_eq!(BackendType::parse("memory"), Some(BackendType::Memory));
        assert_eq!(BackendType::parse("mongodb"), None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: StorageConfig = toml::from_str("backend = \"memory\"").unwrap();
        assert_eq!(config.backend, BackendType::Memory);
        assert_eq!(config.file, FileConfig::default());

        let config: StorageConfig =
            toml::from_str("[file]\nbase_dir = \"/var/lib/survey\"\npretty = false").unwrap();
        assert_eq!(config.backend, BackendType::File);
        assert_eq!(config.file.base_dir, PathBuf::from("/var/lib/survey"));
        assert!(!config.file.pretty);
    }
}
