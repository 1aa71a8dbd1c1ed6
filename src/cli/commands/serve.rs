//! Serve command implementation

use anyhow::Result;

use crate::api::ApiServer;
use crate::app::{open_storage, SurveyConfig};

/// Run the HTTP API until interrupted
pub async fn run_serve_command(
    mut config: SurveyConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let storage = open_storage(&config).await?;
    ApiServer::new(storage, &config).start().await
}
