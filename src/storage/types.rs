//! Type definitions for the storage layer

use serde::{Deserialize, Serialize};

/// Connection status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Degraded,
}

/// Health status of a storage backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub healthy: bool,
    pub backend_type: String,
    pub connection_status: ConnectionStatus,
    pub submissions: usize,
    pub comments: usize,
    pub errors: Vec<String>,
}
