//! Request handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ApiError;
use super::server::ApiState;
use crate::auth::{AuthError, RequestContext, SessionToken};
use crate::comments::{Comment, CommentThread, NewComment};
use crate::error::SurveyError;
use crate::service::SurveyResults;
use crate::storage::HealthStatus;
use crate::survey::{export_filename, Catalog, PopularRole, StatsReport, SubmissionRequest};

type ApiResult<T> = Result<T, ApiError>;

fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext::from_authorization(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    )
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: HealthStatus,
}

pub async fn health_check(State(state): State<Arc<ApiState>>) -> ApiResult<Response> {
    let storage = state
        .survey
        .health()
        .await
        .map_err(|e| ApiError::from_survey(e, "Health check failed"))?;

    let (status, label) = if storage.healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    Ok((
        status,
        Json(HealthResponse {
            status: label,
            storage,
        }),
    )
        .into_response())
}

pub async fn catalog(State(state): State<Arc<ApiState>>) -> Json<Catalog> {
    Json(state.survey.catalog())
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub id: String,
}

pub async fn submit(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let request = json_body(payload)?;
    let submission = state
        .survey
        .submit(request)
        .await
        .map_err(|e| ApiError::from_survey(e, "Failed to save response"))?;

    Ok(Json(SubmitResponse {
        success: true,
        id: submission.id,
    }))
}

pub async fn stats(State(state): State<Arc<ApiState>>) -> ApiResult<Json<StatsReport>> {
    state
        .survey
        .stats()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_survey(e, "Failed to fetch statistics"))
}

pub async fn popular_roles(
    State(state): State<Arc<ApiState>>,
) -> ApiResult<Json<Vec<PopularRole>>> {
    let report = state
        .survey
        .stats()
        .await
        .map_err(|e| ApiError::from_survey(e, "Failed to fetch statistics"))?;
    Ok(Json(report.most_popular_roles()))
}

pub async fn results(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> ApiResult<Json<SurveyResults>> {
    state
        .survey
        .results(&request_context(&headers))
        .await
        .map(Json)
        .map_err(|e| ApiError::from_survey(e, "Failed to fetch results"))
}

pub async fn export_results(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let csv = state
        .survey
        .export_csv(&request_context(&headers))
        .await
        .map_err(|e| ApiError::from_survey(e, "Failed to export results"))?;

    let disposition = format!("attachment; filename=\"{}\"", export_filename(Utc::now()));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: &'static str,
    pub deleted: usize,
}

pub async fn reset(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ResetResponse>> {
    let deleted = state
        .survey
        .reset(&request_context(&headers))
        .await
        .map_err(|e| ApiError::from_survey(e, "Failed to reset survey data"))?;

    Ok(Json(ResetResponse {
        success: true,
        message: "Survey data has been reset successfully",
        deleted,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn sign_in(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> ApiResult<Json<SessionToken>> {
    let request = json_body(payload)?;
    let token = state
        .sessions
        .sign_in(&request.username, &request.password)
        .await
        .map_err(|e| {
            if e == AuthError::Disabled {
                warn!("Sign-in attempted while admin access is disabled");
            }
            ApiError::from_survey(SurveyError::from(e), "Sign-in failed")
        })?;

    info!(
        "Admin {} signed in ({} active sessions)",
        request.username,
        state.sessions.active_sessions().await
    );
    Ok(Json(token))
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub async fn sign_out(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> ApiResult<Json<SuccessResponse>> {
    let context = request_context(&headers);
    let token = context
        .bearer_token
        .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))?;
    if !state.sessions.sign_out(&token).await {
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    }
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub success: bool,
    pub comments: Vec<CommentThread>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub success: bool,
    pub comment: Comment,
}

pub async fn list_comments(
    State(state): State<Arc<ApiState>>,
) -> ApiResult<Json<CommentsResponse>> {
    let comments = state
        .comments
        .list_threads()
        .await
        .map_err(|e| ApiError::from_comment(e, "Failed to fetch comments"))?;
    Ok(Json(CommentsResponse {
        success: true,
        comments,
    }))
}

pub async fn create_comment(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let input = json_body(payload)?;
    let comment = state
        .comments
        .create(input)
        .await
        .map_err(|e| ApiError::from_comment(e, "Failed to create comment"))?;
    Ok((
        StatusCode::CREATED,
        Json(CommentResponse {
            success: true,
            comment,
        }),
    ))
}

pub async fn like_comment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = state
        .comments
        .like(&id)
        .await
        .map_err(|e| ApiError::from_comment(e, "Failed to like comment"))?;
    Ok(Json(CommentResponse {
        success: true,
        comment,
    }))
}
