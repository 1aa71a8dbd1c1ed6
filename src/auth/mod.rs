//! Access control for privileged survey operations
//!
//! Raw submissions, CSV export and reset are only available to privileged
//! callers. Whether a caller is privileged is decided by an [`AccessGate`];
//! aggregate statistics never need one.

pub mod sessions;

use async_trait::async_trait;

pub use sessions::{AdminConfig, AdminSessions, AuthError, SessionToken};

/// What the gate gets to see about a caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub bearer_token: Option<String>,
}

impl RequestContext {
    /// Caller with no credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }

    /// Build a context from an `Authorization` header value
    pub fn from_authorization(header: Option<&str>) -> Self {
        let bearer_token = header
            .and_then(|value| {
                let (scheme, token) = value.trim().split_once(' ')?;
                scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
            })
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        Self { bearer_token }
    }
}

/// Decides whether a caller may see raw records or trigger a reset
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn is_privileged(&self, context: &RequestContext) -> bool;
}

/// Gate for an operator working on the host itself (the CLI)
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOperator;

#[async_trait]
impl AccessGate for LocalOperator {
    async fn is_privileged(&self, _context: &RequestContext) -> bool {
        true
    }
}
