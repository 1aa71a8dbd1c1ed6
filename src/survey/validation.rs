//! Submission validation
//!
//! The one rule set shared by the interactive assignment path and the
//! persistence boundary. Checks run in a fixed order and the first failure is
//! reported, so the same input always produces the same message.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::catalog::{ChefId, Role};

/// Wire form of a respondent's answers: chef id -> role id
pub type Responses = BTreeMap<String, String>;

/// Why a submission was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,

    #[error("Missing assignments for chefs: {}", .0.join(", "))]
    MissingAssignments(Vec<String>),

    #[error("Invalid chef IDs: {}", .0.join(", "))]
    UnknownEntities(Vec<String>),

    #[error("Invalid roles: {}", .0.join(", "))]
    InvalidRoles(Vec<String>),

    #[error("Roles used multiple times: {}", JoinRoles(.0))]
    DuplicateRoles(Vec<Role>),

    #[error("Missing roles: {}", JoinRoles(.0))]
    MissingRoles(Vec<Role>),
}

struct JoinRoles<'a>(&'a [Role]);

impl fmt::Display for JoinRoles<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        Ok(())
    }
}

/// A complete, one-to-one chef -> role mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedResponses(BTreeMap<ChefId, Role>);

impl ValidatedResponses {
    pub fn role_of(&self, chef: ChefId) -> Role {
        // every catalog chef is present once validated
        self.0[&chef]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChefId, Role)> + '_ {
        self.0.iter().map(|(chef, role)| (*chef, *role))
    }

    pub fn to_responses(&self) -> Responses {
        self.iter()
            .map(|(chef, role)| (chef.as_str().to_string(), role.as_str().to_string()))
            .collect()
    }
}

/// Check a respondent name and answers against the catalog
pub fn validate_submission(
    name: &str,
    responses: &Responses,
) -> Result<ValidatedResponses, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }

    let missing_chefs: Vec<String> = ChefId::ALL
        .iter()
        .filter(|chef| !responses.contains_key(chef.as_str()))
        .map(|chef| chef.as_str().to_string())
        .collect();
    if !missing_chefs.is_empty() {
        return Err(ValidationError::MissingAssignments(missing_chefs));
    }

    let unknown_chefs: Vec<String> = responses
        .keys()
        .filter(|id| ChefId::parse(id).is_none())
        .cloned()
        .collect();
    if !unknown_chefs.is_empty() {
        return Err(ValidationError::UnknownEntities(unknown_chefs));
    }

    let mut invalid_roles: Vec<String> = Vec::new();
    for value in responses.values() {
        if Role::parse(value).is_none() && !invalid_roles.contains(value) {
            invalid_roles.push(value.clone());
        }
    }
    if !invalid_roles.is_empty() {
        return Err(ValidationError::InvalidRoles(invalid_roles));
    }

    let typed: Vec<(ChefId, Role)> = responses
        .iter()
        .filter_map(|(chef, role)| Some((ChefId::parse(chef)?, Role::parse(role)?)))
        .collect();

    let mut role_counts: BTreeMap<Role, usize> = BTreeMap::new();
    for (_, role) in &typed {
        *role_counts.entry(*role).or_default() += 1;
    }

    let duplicated: Vec<Role> = Role::ALL
        .into_iter()
        .filter(|role| role_counts.get(role).copied().unwrap_or(0) > 1)
        .collect();
    if !duplicated.is_empty() {
        return Err(ValidationError::DuplicateRoles(duplicated));
    }

    let unused: Vec<Role> = Role::ALL
        .into_iter()
        .filter(|role| !role_counts.contains_key(role))
        .collect();
    if !unused.is_empty() {
        return Err(ValidationError::MissingRoles(unused));
    }

    Ok(ValidatedResponses(typed.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(pairs: &[(&str, &str)]) -> Responses {
        pairs
            .iter()
            .map(|(chef, role)| (chef.to_string(), role.to_string()))
            .collect()
    }

    fn complete() -> Responses {
        responses(&[
            ("assaf-granit", "ski"),
            ("yossi-shitrit", "cook"),
            ("moshik-roth", "kill"),
        ])
    }

    #[test]
    fn test_complete_bijection_is_accepted() {
        let validated = validate_submission("Noa", &complete()).unwrap();
        assert_eq!(validated.role_of(ChefId::AssafGranit), Role::Ski);
        assert_eq!(validated.role_of(ChefId::YossiShitrit), Role::Cook);
        assert_eq!(validated.role_of(ChefId::MoshikRoth), Role::Kill);
        assert_eq!(validated.to_responses(), complete());
    }

    #[test]
    fn test_blank_name_is_rejected_first() {
        // name is checked before anything else, even with empty answers
        assert_eq!(
            validate_submission("   ", &Responses::new()),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            validate_submission("", &complete()),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn test_missing_chefs_are_listed_in_catalog_order() {
        let answers = responses(&[("yossi-shitrit", "cook")]);
        assert_eq!(
            validate_submission("Noa", &answers),
            Err(ValidationError::MissingAssignments(vec![
                "assaf-granit".to_string(),
                "moshik-roth".to_string(),
            ]))
        );
    }

    #[test]
    fn test_unknown_chef_ids() {
        let mut answers = complete();
        answers.insert("gordon-ramsay".to_string(), "ski".to_string());
        assert_eq!(
            validate_submission("Noa", &answers),
            Err(ValidationError::UnknownEntities(vec![
                "gordon-ramsay".to_string()
            ]))
        );
    }

    #[test]
    fn test_invalid_roles_are_reported_once() {
        let answers = responses(&[
            ("assaf-granit", "bake"),
            ("yossi-shitrit", "bake"),
            ("moshik-roth", "kill"),
        ]);
        assert_eq!(
            validate_submission("Noa", &answers),
            Err(ValidationError::InvalidRoles(vec!["bake".to_string()]))
        );
    }

    #[test]
    fn test_duplicate_roles() {
        let answers = responses(&[
            ("assaf-granit", "ski"),
            ("yossi-shitrit", "ski"),
            ("moshik-roth", "kill"),
        ]);
        let err = validate_submission("Noa", &answers).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateRoles(vec![Role::Ski]));
        assert_eq!(err.to_string(), "Roles used multiple times: ski");
    }

    #[test]
    fn test_triplicate_role_reports_duplicate_before_missing() {
        let answers = responses(&[
            ("assaf-granit", "kill"),
            ("yossi-shitrit", "kill"),
            ("moshik-roth", "kill"),
        ]);
        assert_eq!(
            validate_submission("Noa", &answers),
            Err(ValidationError::DuplicateRoles(vec![Role::Kill]))
        );
    }

    #[test]
    fn test_messages_match_user_facing_wording() {
        assert_eq!(ValidationError::MissingName.to_string(), "Name is required");
        assert_eq!(
            ValidationError::MissingAssignments(vec!["a".into(), "b".into()]).to_string(),
            "Missing assignments for chefs: a, b"
        );
        assert_eq!(
            ValidationError::UnknownEntities(vec!["x".into()]).to_string(),
            "Invalid chef IDs: x"
        );
        assert_eq!(
            ValidationError::InvalidRoles(vec!["x".into()]).to_string(),
            "Invalid roles: x"
        );
        assert_eq!(
            ValidationError::MissingRoles(vec![Role::Cook, Role::Kill]).to_string(),
            "Missing roles: cook, kill"
        );
    }
}
