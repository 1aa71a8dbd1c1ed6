//! In-memory storage backend for tests and throwaway servers

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::comments::Comment;
use crate::storage::{
    error::{StorageError, StorageResult},
    traits::*,
    types::*,
};
use crate::survey::Submission;

/// In-memory storage backend
#[derive(Default)]
pub struct MemoryBackend {
    submissions: Arc<RwLock<Vec<Submission>>>,
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl MemoryBackend {
    /// Create a new, empty memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyStorage for MemoryBackend {
    fn submissions(&self) -> &dyn SubmissionStore {
        self
    }

    fn comments(&self) -> &dyn CommentStore {
        self
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        Ok(HealthStatus {
            healthy: true,
            backend_type: "memory".to_string(),
            connection_status: ConnectionStatus::Connected,
            submissions: self.submissions.read().await.len(),
            comments: self.comments.read().await.len(),
            errors: vec![],
        })
    }
}

#[async_trait]
impl SubmissionStore for MemoryBackend {
    async fn create_submission(&self, submission: Submission) -> StorageResult<Submission> {
        let mut submissions = self.submissions.write().await;
        if submissions.iter().any(|s| s.id == submission.id) {
            return Err(StorageError::conflict(format!(
                "Submission {} already exists",
                submission.id
            )));
        }
        submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_submissions(&self) -> StorageResult<Vec<Submission>> {
        Ok(self.submissions.read().await.clone())
    }

    async fn delete_all_submissions(&self) -> StorageResult<usize> {
        let mut submissions = self.submissions.write().await;
        let removed = submissions.len();
        submissions.clear();
        Ok(removed)
    }
}

#[async_trait]
impl CommentStore for MemoryBackend {
    async fn create_comment(&self, comment: Comment) -> StorageResult<Comment> {
        let mut comments = self.comments.write().await;
        if comments.iter().any(|c| c.id == comment.id) {
            return Err(StorageError::conflict(format!(
                "Comment {} already exists",
                comment.id
            )));
        }
        comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self) -> StorageResult<Vec<Comment>> {
        Ok(self.comments.read().await.clone())
    }

    async fn get_comment(&self, id: &str) -> StorageResult<Option<Comment>> {
        Ok(self.comments.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn increment_likes(&self, id: &str) -> StorageResult<Option<Comment>> {
        let mut comments = self.comments.write().await;
        Ok(comments.iter_mut().find(|c| c.id == id).map(|comment| {
            comment.likes += 1;
            comment.updated_at = chrono::Utc::now();
            comment.clone()
        }))
    }
}
