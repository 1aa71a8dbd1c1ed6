//! Behavioral tests run against every storage backend
use crate::comments::Comment;
use crate::storage::backends::{FileBackend, MemoryBackend};
use crate::storage::config::StorageConfig;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::traits::{CommentStore, SubmissionStore, SurveyStorage};
use crate::survey::Submission;
use tempfile::TempDir;
use uuid::Uuid;

/// Create a test submission
fn create_test_submission(name: &str, timestamp: i64) -> Submission {
    Submission {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        timestamp,
        responses: [
            ("assaf-granit", "ski"),
            ("yossi-shitrit", "cook"),
            ("moshik-roth", "kill"),
        ]
        .into_iter()
        .map(|(chef, role)| (chef.to_string(), role.to_string()))
        .collect(),
    }
}

/// Test harness for running tests against any storage backend
async fn test_backend<T: SurveyStorage>(storage: &T) -> StorageResult<()> {
    test_submission_storage(storage.submissions()).await?;
    test_comment_storage(storage.comments()).await?;

    let health = storage.health_check().await?;
    assert!(health.healthy);
    assert_eq!(health.comments, 2);
    Ok(())
}

async fn test_submission_storage(storage: &dyn SubmissionStore) -> StorageResult<()> {
    assert!(storage.list_submissions().await?.is_empty());

    let first = storage
        .create_submission(create_test_submission("Alice", 1))
        .await?;
    let second = storage
        .create_submission(create_test_submission("Bob", 2))
        .await?;

    let listed = storage.list_submissions().await?;
    assert_eq!(listed, vec![first.clone(), second]);

    // the same id cannot be stored twice
    let duplicate = storage.create_submission(first).await;
    assert!(matches!(duplicate, Err(StorageError::Conflict(_))));

    assert_eq!(storage.delete_all_submissions().await?, 2);
    assert!(storage.list_submissions().await?.is_empty());
    assert_eq!(storage.delete_all_submissions().await?, 0);
    Ok(())
}

async fn test_comment_storage(storage: &dyn CommentStore) -> StorageResult<()> {
    let root = storage
        .create_comment(Comment::new(
            "Alice".to_string(),
            "Great survey".to_string(),
            None,
        ))
        .await?;
    let reply = storage
        .create_comment(Comment::new(
            "Bob".to_string(),
            "Agreed".to_string(),
            Some(root.id.clone()),
        ))
        .await?;

    assert_eq!(storage.list_comments().await?.len(), 2);
    assert_eq!(storage.get_comment(&reply.id).await?, Some(reply.clone()));
    assert_eq!(storage.get_comment("missing").await?, None);

    let liked = storage.increment_likes(&root.id).await?.unwrap();
    assert_eq!(liked.likes, 1);
    let liked = storage.increment_likes(&root.id).await?.unwrap();
    assert_eq!(liked.likes, 2);
    assert_eq!(storage.get_comment(&root.id).await?.unwrap().likes, 2);

    assert_eq!(storage.increment_likes("missing").await?, None);
    Ok(())
}

#[tokio::test]
async fn test_memory_backend() {
    let backend = MemoryBackend::new();
    test_backend(&backend).await.unwrap();
}

#[tokio::test]
async fn test_file_backend() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(&StorageConfig::file(temp_dir.path()))
        .await
        .unwrap();
    test_backend(&backend).await.unwrap();
}

#[tokio::test]
async fn test_file_backend_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig::file(temp_dir.path());

    let stored = {
        let backend = FileBackend::new(&config).await.unwrap();
        backend
            .create_submission(create_test_submission("Carol", 3))
            .await
            .unwrap()
    };

    let reopened = FileBackend::new(&config).await.unwrap();
    assert_eq!(reopened.list_submissions().await.unwrap(), vec![stored]);
    assert!(temp_dir.path().join("responses.json").exists());
}

#[tokio::test]
async fn test_concurrent_creates_are_not_lost() {
    let temp_dir = TempDir::new().unwrap();
    let backend = std::sync::Arc::new(
        FileBackend::new(&StorageConfig::file(temp_dir.path()))
            .await
            .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..10 {
        let backend = backend.clone();
        handles.push(tokio::spawn(async move {
            backend
                .create_submission(create_test_submission(&format!("user{i}"), i))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(backend.list_submissions().await.unwrap().len(), 10);
}
