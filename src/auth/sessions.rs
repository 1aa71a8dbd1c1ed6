//! Admin sign-in and bearer sessions

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{AccessGate, RequestContext};

/// Admin credentials and session lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_username")]
    pub username: String,

    /// Sign-in is disabled while no password is configured
    #[serde(default)]
    pub password: Option<String>,

    #[serde(with = "humantime_serde", default = "default_session_ttl")]
    pub session_ttl: Duration,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_session_ttl() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: None,
            session_ttl: default_session_ttl(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Admin sign-in is not configured")]
    Disabled,
}

/// Token handed out on a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and checks admin bearer sessions
pub struct AdminSessions {
    config: AdminConfig,
    sessions: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl AdminSessions {
    pub fn new(config: AdminConfig) -> Self {
        if config.password.is_none() {
            warn!("No admin password configured; privileged endpoints are unavailable");
        }
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SessionToken, AuthError> {
        self.sign_in_at(username, password, Utc::now()).await
    }

    async fn sign_in_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, AuthError> {
        let expected = self.config.password.as_deref().ok_or(AuthError::Disabled)?;
        if username != self.config.username || password != expected {
            info!("Rejected admin sign-in for user {:?}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(24));
        let token = SessionToken {
            token: Uuid::new_v4().to_string(),
            expires_at: now + ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, expires_at| *expires_at > now);
        sessions.insert(token.token.clone(), token.expires_at);

        debug!("Admin session issued, expires {}", token.expires_at);
        Ok(token)
    }

    /// Revoke a token; returns whether it was active
    pub async fn sign_out(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    async fn is_valid_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.sessions
            .read()
            .await
            .get(token)
            .is_some_and(|expires_at| *expires_at > now)
    }

    pub async fn active_sessions(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|expires_at| **expires_at > now)
            .count()
    }
}

#[async_trait]
impl AccessGate for AdminSessions {
    async fn is_privileged(&self, context: &RequestContext) -> bool {
        match &context.bearer_token {
            Some(token) => self.is_valid_at(token, Utc::now()).await,
            None => false,
        }
    }
}
