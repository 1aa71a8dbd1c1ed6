//! Commands over raw responses: results, export and reset

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::auth::RequestContext;
use crate::service::SurveyService;
use crate::survey::export::submission_date;

pub async fn run_results_command(service: &SurveyService) -> Result<()> {
    let results = service.results(&RequestContext::anonymous()).await?;
    if results.responses.is_empty() {
        println!("No responses yet.");
        return Ok(());
    }

    for submission in &results.responses {
        let answers = submission
            .responses
            .iter()
            .map(|(chef, role)| format!("{}={}", chef, role))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{}  {:<20} {:<25} {}  {}",
            submission.id,
            submission.name,
            submission.email.as_deref().unwrap_or("-"),
            submission_date(submission),
            answers
        );
    }
    println!("{} response(s)", results.stats.total_responses);
    Ok(())
}

pub async fn run_export_command(service: &SurveyService, output: Option<&Path>) -> Result<()> {
    let csv = service.export_csv(&RequestContext::anonymous()).await?;
    match output {
        Some(path) => {
            tokio::fs::write(path, csv)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported results to {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

pub async fn run_reset_command(service: &SurveyService, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to delete all responses without --yes");
    }
    let deleted = service.reset(&RequestContext::anonymous()).await?;
    println!("Deleted {} response(s)", deleted);
    Ok(())
}
