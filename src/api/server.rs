//! HTTP server hosting the survey

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::handlers;
use crate::app::SurveyConfig;
use crate::auth::AdminSessions;
use crate::comments::CommentService;
use crate::service::SurveyService;
use crate::storage::SurveyStorage;

/// Shared API state
pub struct ApiState {
    pub survey: SurveyService,
    pub comments: CommentService,
    pub sessions: Arc<AdminSessions>,
}

impl ApiState {
    /// Wire the services around one storage handle; admin sessions gate
    /// the privileged survey operations
    pub fn new(storage: Arc<dyn SurveyStorage>, sessions: Arc<AdminSessions>) -> Self {
        Self {
            survey: SurveyService::new(Arc::clone(&storage), sessions.clone()),
            comments: CommentService::new(storage),
            sessions,
        }
    }
}

/// Build API router
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/catalog", get(handlers::catalog))
        .route("/api/submit", post(handlers::submit))
        .route("/api/stats", get(handlers::stats))
        .route("/api/stats/popular", get(handlers::popular_roles))
        .route("/api/results", get(handlers::results))
        .route("/api/results/export", get(handlers::export_results))
        .route("/api/reset", post(handlers::reset))
        .route("/api/auth/signin", post(handlers::sign_in))
        .route("/api/auth/signout", post(handlers::sign_out))
        .route(
            "/api/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route("/api/comments/{id}/like", post(handlers::like_comment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API server for the survey endpoints
pub struct ApiServer {
    state: Arc<ApiState>,
    address: String,
}

impl ApiServer {
    pub fn new(storage: Arc<dyn SurveyStorage>, config: &SurveyConfig) -> Self {
        let sessions = Arc::new(AdminSessions::new(config.admin.clone()));
        Self {
            state: Arc::new(ApiState::new(storage, sessions)),
            address: config.server.address(),
        }
    }

    /// Bind and serve until ctrl-c
    pub async fn start(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.address)
            .await
            .with_context(|| format!("Failed to bind {}", self.address))?;

        info!("Starting survey API server on {}", listener.local_addr()?);

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Survey API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
