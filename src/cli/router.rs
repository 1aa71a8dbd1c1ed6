//! Command routing and execution

use anyhow::Result;
use std::sync::Arc;

use crate::app::{open_storage, SurveyConfig};
use crate::auth::LocalOperator;
use crate::cli::args::Commands;
use crate::cli::commands::*;
use crate::service::SurveyService;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Commands, config: SurveyConfig) -> Result<()> {
    match command {
        Commands::Serve { host, port } => run_serve_command(config, host, port).await,
        Commands::Catalog => run_catalog_command(&local_service(&config).await?),
        Commands::Submit {
            name,
            email,
            assignments,
        } => run_submit_command(&local_service(&config).await?, name, email, &assignments).await,
        Commands::Stats { json } => run_stats_command(&local_service(&config).await?, json).await,
        Commands::Results => run_results_command(&local_service(&config).await?).await,
        Commands::Export { output } => {
            run_export_command(&local_service(&config).await?, output.as_deref()).await
        }
        Commands::Reset { yes } => run_reset_command(&local_service(&config).await?, yes).await,
    }
}

/// Service for commands run on the host itself, where the operator is privileged
async fn local_service(config: &SurveyConfig) -> Result<SurveyService> {
    let storage = open_storage(config).await?;
    Ok(SurveyService::new(storage, Arc::new(LocalOperator)))
}
