//! Service-level error type shared by the HTTP API and the CLI

use thiserror::Error;

use crate::auth::AuthError;
use crate::storage::StorageError;
use crate::survey::{AssignmentError, ExportError, ValidationError};

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid assignment: {0}")]
    Assignment(#[from] AssignmentError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Access denied: privileged access required")]
    AccessDenied,

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SurveyError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Storage(_) => 4,
            Self::AccessDenied | Self::Auth(_) => 5,
            Self::Export(_) => 6,
            Self::Validation(_) | Self::Assignment(_) => 8,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Assignment(e) => e.to_string(),
            Self::Storage(_) => "The survey store is unavailable, please try again".to_string(),
            Self::AccessDenied => "This operation requires admin access".to_string(),
            Self::Auth(e) => e.to_string(),
            Self::Export(e) => format!("Could not export results: {}", e),
            Self::Config(message) => format!("Configuration problem: {}", message),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        message
    }

    /// Failures the caller can fix by changing its input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Assignment(_) | Self::AccessDenied | Self::Auth(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
