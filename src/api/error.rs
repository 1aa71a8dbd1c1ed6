//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::comments::CommentError;
use crate::error::SurveyError;

/// Error body: `{"success": false, "error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// Details are logged; clients only see the message
    Internal(String),
}

impl ApiError {
    /// Map a service error; `failure` is what clients see for store failures
    pub fn from_survey(err: SurveyError, failure: &str) -> Self {
        match err {
            SurveyError::Validation(e) => Self::BadRequest(e.to_string()),
            SurveyError::Assignment(e) => Self::BadRequest(e.to_string()),
            SurveyError::AccessDenied => Self::Unauthorized("Unauthorized".to_string()),
            SurveyError::Auth(e) => Self::Unauthorized(e.to_string()),
            other => {
                error!("{}: {}", failure, other.developer_message());
                Self::Internal(failure.to_string())
            }
        }
    }

    pub fn from_comment(err: CommentError, failure: &str) -> Self {
        match err {
            CommentError::MissingFields | CommentError::InvalidId => {
                Self::BadRequest(err.to_string())
            }
            CommentError::NotFound => Self::NotFound(err.to_string()),
            CommentError::Storage(e) => {
                error!("{}: {}", failure, e);
                Self::Internal(failure.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_message(self) -> String {
        match self {
            Self::BadRequest(m) | Self::Unauthorized(m) | Self::NotFound(m) | Self::Internal(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: self.into_message(),
        };
        (status, Json(body)).into_response()
    }
}
