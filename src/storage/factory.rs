//! Storage factory for creating storage instances

use std::sync::Arc;
use tracing::info;

use super::backends::{FileBackend, MemoryBackend};
use super::config::{BackendType, StorageConfig};
use super::error::StorageResult;
use super::traits::SurveyStorage;

/// Factory for creating storage instances
pub struct StorageFactory;

impl StorageFactory {
    /// Create storage from explicit configuration
    pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn SurveyStorage>> {
        match config.backend {
            BackendType::File => {
                let backend = FileBackend::new(config).await?;
                info!("Using file storage at {}", backend.base_dir().display());
                Ok(Arc::new(backend))
            }
            BackendType::Memory => {
                info!("Using in-memory storage; data is lost on exit");
                Ok(Arc::new(MemoryBackend::new()))
            }
        }
    }

    /// Create a test storage instance (memory backend)
    pub fn create_test_storage() -> Arc<dyn SurveyStorage> {
        Arc::new(MemoryBackend::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_creates_file_backend() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = StorageConfig::file(temp_dir.path().join("survey"));

        let storage = StorageFactory::from_config(&config).await.unwrap();
        let health = storage.health_check().await.unwrap();
        assert!(health.healthy);
        assert_eq!(health.backend_type, "file");
    }

    #[tokio::test]
    async fn test_factory_creates_memory_backend() {
        let storage = StorageFactory::from_config(&StorageConfig::memory())
            .await
            .unwrap();
        let health = storage.health_check().await.unwrap();
        assert_eq!(health.backend_type, "memory");
        assert_eq!(health.submissions, 0);
    }
}
