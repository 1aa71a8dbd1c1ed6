//! Comment threads with replies and likes

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use super::models::{Comment, CommentThread, NewComment};
use crate::storage::{StorageError, SurveyStorage};

#[derive(Debug, Error)]
pub enum CommentError {
    #[error("Author and content are required")]
    MissingFields,

    #[error("Invalid comment ID")]
    InvalidId,

    #[error("Comment not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct CommentService {
    storage: Arc<dyn SurveyStorage>,
}

impl CommentService {
    pub fn new(storage: Arc<dyn SurveyStorage>) -> Self {
        Self { storage }
    }

    /// Root comments newest first, each with its replies oldest first
    pub async fn list_threads(&self) -> Result<Vec<CommentThread>, CommentError> {
        let comments = self.storage.comments().list_comments().await?;
        Ok(build_threads(comments))
    }

    /// Store a new comment, or a reply when `parent_id` is set
    pub async fn create(&self, input: NewComment) -> Result<Comment, CommentError> {
        let author = input.author.trim();
        let content = input.content.trim();
        if author.is_empty() || content.is_empty() {
            return Err(CommentError::MissingFields);
        }

        let parent_id = match input.parent_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(parent_id) => {
                parse_id(parent_id)?;
                let parent = self
                    .storage
                    .comments()
                    .get_comment(parent_id)
                    .await?
                    .ok_or(CommentError::NotFound)?;
                // threads are one level deep: replying to a reply joins its thread
                Some(parent.parent_id.unwrap_or(parent.id))
            }
        };

        let comment = Comment::new(author.to_string(), content.to_string(), parent_id);
        let stored = self
            .storage
            .comments()
            .create_comment(comment)
            .await
            .inspect_err(|e| error!("Error creating comment: {}", e))?;

        debug!("Comment {} created by {}", stored.id, stored.author);
        Ok(stored)
    }

    pub async fn like(&self, id: &str) -> Result<Comment, CommentError> {
        parse_id(id)?;
        self.storage
            .comments()
            .increment_likes(id)
            .await
            .inspect_err(|e| error!("Error liking comment: {}", e))?
            .ok_or(CommentError::NotFound)
    }
}

fn parse_id(id: &str) -> Result<Uuid, CommentError> {
    Uuid::parse_str(id).map_err(|_| CommentError::InvalidId)
}

/// Group flat comments into threads
///
/// Replies whose parent is missing or is itself a reply are dropped from the
/// view rather than promoted to roots.
pub fn build_threads(comments: Vec<Comment>) -> Vec<CommentThread> {
    let (mut roots, replies): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(Comment::is_root);

    roots.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    roots
        .into_iter()
        .map(|root| {
            let mut thread_replies: Vec<Comment> = replies
                .iter()
                .filter(|reply| reply.parent_id.as_deref() == Some(root.id.as_str()))
                .cloned()
                .collect();
            thread_replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            CommentThread {
                comment: root,
                replies: thread_replies,
            }
        })
        .collect()
}
