//! CSV export of raw submissions

use chrono::{DateTime, Utc};

use super::catalog::{ChefId, Role};
use super::submission::Submission;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Failed to finish CSV output: {0}")]
    Flush(String),
}

/// Short US-style date, e.g. `Oct 19, 2026`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Submission date for display; blank when the record has none
pub fn submission_date(submission: &Submission) -> String {
    submission
        .submitted_at()
        .map(format_date)
        .unwrap_or_default()
}

/// Suggested download name for an export created at `now`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("survey-results-{}.csv", now.format("%Y-%m-%d"))
}

/// Render submissions as CSV: name, email, date, then one role label per chef
pub fn submissions_to_csv(submissions: &[Submission]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Name", "Email", "Date"];
    header.extend(ChefId::ALL.iter().map(|chef| chef.chef().name));
    writer.write_record(&header)?;

    for submission in submissions {
        let mut row = vec![
            submission.name.clone(),
            submission.email.clone().unwrap_or_default(),
            submission_date(submission),
        ];
        row.extend(ChefId::ALL.iter().map(|chef| {
            submission
                .responses
                .get(chef.as_str())
                .and_then(|role| Role::parse(role))
                .map(|role| role.label().to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
