//! Public survey commands: catalog, submit and stats

use anyhow::{Context, Result};

use crate::error::SurveyError;
use crate::service::SurveyService;
use crate::survey::{most_popular_role, AssignmentSet, Catalog, ChefId, Role, StatsReport, SubmissionRequest};

pub fn run_catalog_command(service: &SurveyService) -> Result<()> {
    print!("{}", format_catalog(&service.catalog()));
    Ok(())
}

pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("Chefs:\n");
    for chef in catalog.chefs {
        out.push_str(&format!("  {:<15} {}\n", chef.id, chef.name));
    }
    out.push_str("Roles:\n");
    for role in &catalog.roles {
        out.push_str(&format!("  {:<15} {}\n", role.id, role.label));
    }
    out
}

/// Parse `CHEF=ROLE` flags into an assignment set, in order
pub fn build_assignments(assignments: &[String]) -> Result<AssignmentSet> {
    let mut set = AssignmentSet::new();
    for assignment in assignments {
        let (chef, role) = assignment
            .split_once('=')
            .with_context(|| format!("Invalid assignment '{}', expected CHEF=ROLE", assignment))?;
        set.assign_by_id(chef.trim(), role.trim())
            .map_err(SurveyError::from)?;
    }
    Ok(set)
}

pub async fn run_submit_command(
    service: &SurveyService,
    name: String,
    email: Option<String>,
    assignments: &[String],
) -> Result<()> {
    let set = build_assignments(assignments)?;
    let request = SubmissionRequest {
        name,
        email,
        responses: set.responses(),
    };

    let submission = service.submit(request).await?;
    println!("Recorded response {} from {}", submission.id, submission.name);
    for (chef, role) in set.iter() {
        if let Some(role) = role {
            println!("  {:<15} {}", chef.chef().name, role.label());
        }
    }
    Ok(())
}

pub async fn run_stats_command(service: &SurveyService, json: bool) -> Result<()> {
    let report = service.stats().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_stats(&report));
    }
    Ok(())
}

pub fn format_stats(report: &StatsReport) -> String {
    let mut out = format!("Total responses: {}\n", report.total_responses);
    for chef in ChefId::ALL {
        let counts = Role::ALL
            .iter()
            .map(|role| format!("{}={}", role, report.count(chef, *role)))
            .collect::<Vec<_>>()
            .join(" ");
        let popular = most_popular_role(chef, report)
            .map(|(role, _)| role.label())
            .unwrap_or("-");
        out.push_str(&format!(
            "  {:<15} {}  most popular: {}\n",
            chef.chef().name,
            counts,
            popular
        ));
    }
    out
}
