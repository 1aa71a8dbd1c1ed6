//! Core trait definitions for the record store

use async_trait::async_trait;

use super::error::StorageResult;
use super::types::HealthStatus;
use crate::comments::Comment;
use crate::survey::Submission;

/// Unified storage interface providing access to all record collections
#[async_trait]
pub trait SurveyStorage: Send + Sync {
    /// Get the submission storage implementation
    fn submissions(&self) -> &dyn SubmissionStore;

    /// Get the comment storage implementation
    fn comments(&self) -> &dyn CommentStore;

    /// Check the health of the storage backend
    async fn health_check(&self) -> StorageResult<HealthStatus>;
}

/// Survey submission storage: append, list and delete-all
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a new submission
    async fn create_submission(&self, submission: Submission) -> StorageResult<Submission>;

    /// All submissions in the order they were created
    async fn list_submissions(&self) -> StorageResult<Vec<Submission>>;

    /// Remove every submission, returning how many were removed
    async fn delete_all_submissions(&self) -> StorageResult<usize>;
}

/// Comment storage
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Persist a new comment or reply
    async fn create_comment(&self, comment: Comment) -> StorageResult<Comment>;

    /// All comments in the order they were created
    async fn list_comments(&self) -> StorageResult<Vec<Comment>>;

    /// Load a comment by ID
    async fn get_comment(&self, id: &str) -> StorageResult<Option<Comment>>;

    /// Add one like, returning the updated comment if it exists
    async fn increment_likes(&self, id: &str) -> StorageResult<Option<Comment>>;
}
