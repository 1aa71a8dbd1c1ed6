//! Record store for submissions and comments
//!
//! Storage is reached through the [`SurveyStorage`] trait. Handles are built
//! explicitly by [`StorageFactory`] and passed to whatever hosts the survey,
//! so nothing here depends on global state.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use backends::{FileBackend, MemoryBackend};
pub use config::{BackendType, FileConfig, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use traits::{CommentStore, SubmissionStore, SurveyStorage};
pub use types::{ConnectionStatus, HealthStatus};
