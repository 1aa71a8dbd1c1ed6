//! File-based storage backend implementation
//!
//! Each collection is a single JSON array on disk. Every operation holds the
//! collection's lock for its whole read-modify-write, and writes land in a
//! temporary file that is renamed over the original.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::comments::Comment;
use crate::storage::{
    config::{FileConfig, StorageConfig},
    error::{StorageError, StorageResult},
    traits::*,
    types::*,
};
use crate::survey::Submission;

const SUBMISSIONS_FILE: &str = "responses.json";
const COMMENTS_FILE: &str = "comments.json";

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// File-based storage backend
pub struct FileBackend {
    config: FileConfig,
    submissions_lock: Mutex<()>,
    comments_lock: Mutex<()>,
}

impl FileBackend {
    /// Create a new file backend, creating the base directory if needed
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        Self::from_file_config(config.file.clone()).await
    }

    pub async fn from_file_config(config: FileConfig) -> StorageResult<Self> {
        fs::create_dir_all(&config.base_dir).await.map_err(|e| {
            StorageError::configuration(format!(
                "Cannot create storage directory {}: {}",
                config.base_dir.display(),
                e
            ))
        })?;

        debug!("File storage rooted at {}", config.base_dir.display());
        Ok(Self {
            config,
            submissions_lock: Mutex::new(()),
            comments_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.config.base_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.config.base_dir.join(file)
    }

    /// Read a JSON array as untyped records
    ///
    /// A missing or empty file is an empty collection. Only a file that is not
    /// a JSON array at all is an error.
    async fn read_records(&self, file: &str) -> StorageResult<Vec<Value>> {
        let path = self.path(file);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            warn!("Failed to parse {}: {}", path.display(), e);
            StorageError::serialization(format!("{}: {}", path.display(), e))
        })
    }

    /// Read a JSON array, skipping records that cannot be decoded
    async fn read_all<T: DeserializeOwned>(&self, file: &str) -> StorageResult<Vec<T>> {
        let records = self.read_records(file).await?;
        Ok(records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping damaged record {} in {}: {}", index, file, e);
                    None
                }
            })
            .collect())
    }

    /// Append one record, leaving the existing ones untouched
    async fn append<T: Serialize>(&self, file: &str, id: &str, item: &T) -> StorageResult<()> {
        let mut records = self.read_records(file).await?;
        if records.iter().any(|record| record_id(record) == Some(id)) {
            return Err(StorageError::conflict(format!(
                "Record {} already exists in {}",
                id, file
            )));
        }
        records.push(serde_json::to_value(item)?);
        self.write_all(file, &records).await
    }

    /// Replace a JSON array on disk
    async fn write_all<T: Serialize>(&self, file: &str, items: &[T]) -> StorageResult<()> {
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        let content = if self.config.pretty {
            serde_json::to_string_pretty(items)?
        } else {
            serde_json::to_string(items)?
        };

        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl SurveyStorage for FileBackend {
    fn submissions(&self) -> &dyn SubmissionStore {
        self
    }

    fn comments(&self) -> &dyn CommentStore {
        self
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        let mut errors = Vec::new();

        let submissions = match self.list_submissions().await {
            Ok(items) => items.len(),
            Err(e) => {
                errors.push(e.to_string());
                0
            }
        };
        let comments = match self.list_comments().await {
            Ok(items) => items.len(),
            Err(e) => {
                errors.push(e.to_string());
                0
            }
        };

        Ok(HealthStatus {
            healthy: errors.is_empty(),
            backend_type: "file".to_string(),
            connection_status: if errors.is_empty() {
                ConnectionStatus::Connected
            } else {
                ConnectionStatus::Degraded
            },
            submissions,
            comments,
            errors,
        })
    }
}

#[async_trait]
impl SubmissionStore for FileBackend {
    async fn create_submission(&self, submission: Submission) -> StorageResult<Submission> {
        let _guard = self.submissions_lock.lock().await;
        self.append(SUBMISSIONS_FILE, &submission.id, &submission)
            .await?;
        Ok(submission)
    }

    async fn list_submissions(&self) -> StorageResult<Vec<Submission>> {
        let _guard = self.submissions_lock.lock().await;
        self.read_all(SUBMISSIONS_FILE).await
    }

    async fn delete_all_submissions(&self) -> StorageResult<usize> {
        let _guard = self.submissions_lock.lock().await;
        let existing = match self.read_records(SUBMISSIONS_FILE).await {
            Ok(records) => records.len(),
            Err(e) => {
                warn!("Discarding unreadable submissions: {}", e);
                0
            }
        };
        self.write_all::<Value>(SUBMISSIONS_FILE, &[]).await?;
        Ok(existing)
    }
}

#[async_trait]
impl CommentStore for FileBackend {
    async fn create_comment(&self, comment: Comment) -> StorageResult<Comment> {
        let _guard = self.comments_lock.lock().await;
        self.append(COMMENTS_FILE, &comment.id, &comment).await?;
        Ok(comment)
    }

    async fn list_comments(&self) -> StorageResult<Vec<Comment>> {
        let _guard = self.comments_lock.lock().await;
        self.read_all(COMMENTS_FILE).await
    }

    async fn get_comment(&self, id: &str) -> StorageResult<Option<Comment>> {
        let _guard = self.comments_lock.lock().await;
        let comments: Vec<Comment> = self.read_all(COMMENTS_FILE).await?;
        Ok(comments.into_iter().find(|c| c.id == id))
    }

    async fn increment_likes(&self, id: &str) -> StorageResult<Option<Comment>> {
        let _guard = self.comments_lock.lock().await;
        let mut records = self.read_records(COMMENTS_FILE).await?;
        let Some(slot) = records.iter_mut().find(|record| record_id(record) == Some(id)) else {
            return Ok(None);
        };

        let mut comment: Comment = serde_json::from_value(slot.clone())?;
        comment.likes += 1;
        comment.updated_at = chrono::Utc::now();
        *slot = serde_json::to_value(&comment)?;

        self.write_all(COMMENTS_FILE, &records).await?;
        Ok(Some(comment))
    }
}
