//! Runtime initialization and setup

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::app::config::{AppConfig, SurveyConfig};
use crate::app::logging::init_logging;
use crate::storage::{StorageFactory, SurveyStorage};

/// Load configuration and initialize logging
pub fn initialize_app(verbose: u8, config_path: Option<&Path>) -> Result<SurveyConfig> {
    let config = SurveyConfig::load(config_path)?;
    let app_config = AppConfig::new(verbose).with_configured_level(config.log_level.clone());
    init_logging(&app_config);
    debug!("Effective configuration: {:?}", redacted(&config));
    Ok(config)
}

/// Open the configured record store
pub async fn open_storage(config: &SurveyConfig) -> Result<Arc<dyn SurveyStorage>> {
    StorageFactory::from_config(&config.storage)
        .await
        .context("Failed to open survey storage")
}

fn redacted(config: &SurveyConfig) -> SurveyConfig {
    let mut config = config.clone();
    if config.admin.password.is_some() {
        config.admin.password = Some("***".to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageConfig;

    #[test]
    fn test_redacted_hides_password() {
        let mut config = SurveyConfig::default();
        config.admin.password = Some("hunter2".to_string());
        assert_eq!(redacted(&config).admin.password.as_deref(), Some("***"));
        assert!(redacted(&SurveyConfig::default()).admin.password.is_none());
    }

    #[tokio::test]
    async fn test_open_storage_uses_configured_backend() {
        let config = SurveyConfig {
            storage: StorageConfig::memory(),
            ..Default::default()
        };
        let storage = open_storage(&config).await.unwrap();
        assert_eq!(storage.health_check().await.unwrap().backend_type, "memory");
    }
}
