//! Survey operations exposed to the HTTP API and the CLI
//!
//! Submitting and reading aggregate statistics are open to everyone. Raw
//! submissions, CSV export and reset go through the configured [`AccessGate`].

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::auth::{AccessGate, RequestContext};
use crate::error::{Result, SurveyError};
use crate::storage::{HealthStatus, SurveyStorage};
use crate::survey::{aggregate, submissions_to_csv, Catalog, StatsReport, Submission, SubmissionRequest};

/// Raw submissions together with their aggregate
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResults {
    pub responses: Vec<Submission>,
    pub stats: StatsReport,
}

#[derive(Clone)]
pub struct SurveyService {
    storage: Arc<dyn SurveyStorage>,
    gate: Arc<dyn AccessGate>,
}

impl SurveyService {
    pub fn new(storage: Arc<dyn SurveyStorage>, gate: Arc<dyn AccessGate>) -> Self {
        Self { storage, gate }
    }

    pub fn storage(&self) -> Arc<dyn SurveyStorage> {
        Arc::clone(&self.storage)
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::get()
    }

    /// Validate and persist a new submission
    pub async fn submit(&self, request: SubmissionRequest) -> Result<Submission> {
        let submission = Submission::from_request(request).inspect_err(|e| {
            debug!("Rejected submission: {}", e);
        })?;

        let stored = self
            .storage
            .submissions()
            .create_submission(submission)
            .await
            .inspect_err(|e| {
                error!(retryable = e.is_retryable(), "Error saving submission: {}", e)
            })?;

        info!("Stored submission {} from {}", stored.id, stored.name);
        Ok(stored)
    }

    /// Aggregate statistics over every stored submission
    pub async fn stats(&self) -> Result<StatsReport> {
        let submissions = self.list_all().await?;
        Ok(aggregate(&submissions))
    }

    pub async fn results(&self, context: &RequestContext) -> Result<SurveyResults> {
        self.require_privileged(context).await?;
        let responses = self.list_all().await?;
        let stats = aggregate(&responses);
        Ok(SurveyResults { responses, stats })
    }

    pub async fn export_csv(&self, context: &RequestContext) -> Result<String> {
        self.require_privileged(context).await?;
        let submissions = self.list_all().await?;
        Ok(submissions_to_csv(&submissions)?)
    }

    /// Delete every submission; returns how many were removed
    pub async fn reset(&self, context: &RequestContext) -> Result<usize> {
        self.require_privileged(context).await?;
        let deleted = self
            .storage
            .submissions()
            .delete_all_submissions()
            .await
            .inspect_err(|e| {
                error!(retryable = e.is_retryable(), "Error resetting survey: {}", e)
            })?;

        warn!("Survey reset, {} submissions deleted", deleted);
        Ok(deleted)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        Ok(self.storage.health_check().await?)
    }

    async fn list_all(&self) -> Result<Vec<Submission>> {
        self.storage
            .submissions()
            .list_submissions()
            .await
            .inspect_err(|e| {
                error!(retryable = e.is_retryable(), "Error fetching submissions: {}", e)
            })
            .map_err(SurveyError::from)
    }

    async fn require_privileged(&self, context: &RequestContext) -> Result<()> {
        if self.gate.is_privileged(context).await {
            Ok(())
        } else {
            debug!("Privileged operation refused");
            Err(SurveyError::AccessDenied)
        }
    }
}
