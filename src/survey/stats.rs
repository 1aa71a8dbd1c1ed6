//! Aggregation of submissions into per-chef role counts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::catalog::{ChefId, Role};
use super::submission::Submission;

pub type RoleCounts = BTreeMap<Role, u64>;

/// Role counts for every chef, recomputed on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_responses: usize,
    pub chef_role_counts: BTreeMap<ChefId, RoleCounts>,
}

/// Winning role for a chef
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularRole {
    pub chef_id: ChefId,
    pub role: Role,
    pub count: u64,
}

impl StatsReport {
    /// Every chef/role pair present with a zero count
    pub fn empty() -> Self {
        let zeroes: RoleCounts = Role::ALL.into_iter().map(|role| (role, 0)).collect();
        Self {
            total_responses: 0,
            chef_role_counts: ChefId::ALL
                .into_iter()
                .map(|chef| (chef, zeroes.clone()))
                .collect(),
        }
    }

    pub fn count(&self, chef: ChefId, role: Role) -> u64 {
        self.chef_role_counts
            .get(&chef)
            .and_then(|counts| counts.get(&role))
            .copied()
            .unwrap_or(0)
    }

    /// Popular role of each chef that has at least one vote, in catalog order
    pub fn most_popular_roles(&self) -> Vec<PopularRole> {
        ChefId::ALL
            .into_iter()
            .filter_map(|chef_id| {
                most_popular_role(chef_id, self).map(|(role, count)| PopularRole {
                    chef_id,
                    role,
                    count,
                })
            })
            .collect()
    }
}

/// Count the role given to each chef across all submissions
///
/// A submission that lacks a chef, or names a role outside the catalog,
/// contributes nothing for that chef; the rest of the report is unaffected.
pub fn aggregate(submissions: &[Submission]) -> StatsReport {
    let mut report = StatsReport::empty();
    report.total_responses = submissions.len();

    for submission in submissions {
        for chef in ChefId::ALL {
            let role = submission
                .responses
                .get(chef.as_str())
                .and_then(|role| Role::parse(role));

            match role {
                Some(role) => {
                    if let Some(count) = report
                        .chef_role_counts
                        .get_mut(&chef)
                        .and_then(|counts| counts.get_mut(&role))
                    {
                        *count += 1;
                    }
                }
                None => debug!(
                    "Submission {} has no usable answer for {}, skipping",
                    submission.id, chef
                ),
            }
        }
    }

    report
}

/// Role with the strictly highest count for `chef`
///
/// Ties go to the role declared first in the catalog. Returns `None` when the
/// chef has no votes at all.
pub fn most_popular_role(chef: ChefId, report: &StatsReport) -> Option<(Role, u64)> {
    let mut best: Option<(Role, u64)> = None;
    for role in Role::ALL {
        let count = report.count(chef, role);
        if count > best.map_or(0, |(_, top)| top) {
            best = Some((role, count));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::validation::Responses;

    fn submission(pairs: &[(&str, &str)]) -> Submission {
        Submission {
            id: uuid::Uuid::new_v4().to_string(),
            name: "respondent".to_string(),
            email: None,
            timestamp: 0,
            responses: pairs
                .iter()
                .map(|(chef, role)| (chef.to_string(), role.to_string()))
                .collect::<Responses>(),
        }
    }

    const A: &str = "assaf-granit";
    const B: &str = "yossi-shitrit";
    const C: &str = "moshik-roth";

    fn three_submissions() -> Vec<Submission> {
        vec![
            submission(&[(A, "ski"), (B, "cook"), (C, "kill")]),
            submission(&[(A, "ski"), (B, "kill"), (C, "cook")]),
            submission(&[(A, "cook"), (B, "ski"), (C, "kill")]),
        ]
    }

    #[test]
    fn test_concrete_scenario_counts() {
        let report = aggregate(&three_submissions());

        assert_eq!(report.total_responses, 3);
        let expected = serde_json::json!({
            "totalResponses": 3,
            "chefRoleCounts": {
                "assaf-granit": {"ski": 2, "cook": 1, "kill": 0},
                "yossi-shitrit": {"ski": 1, "cook": 1, "kill": 1},
                "moshik-roth": {"ski": 0, "cook": 1, "kill": 2}
            }
        });
        assert_eq!(serde_json::to_value(&report).unwrap(), expected);
    }

    #[test]
    fn test_most_popular_role_with_tie_takes_catalog_order() {
        let report = aggregate(&three_submissions());

        assert_eq!(
            most_popular_role(ChefId::AssafGranit, &report),
            Some((Role::Ski, 2))
        );
        assert_eq!(
            most_popular_role(ChefId::YossiShitrit, &report),
            Some((Role::Ski, 1))
        );
        assert_eq!(
            most_popular_role(ChefId::MoshikRoth, &report),
            Some((Role::Kill, 2))
        );
    }

    #[test]
    fn test_two_way_tie_after_first_role() {
        let report = aggregate(&[
            submission(&[(A, "cook"), (B, "ski"), (C, "kill")]),
            submission(&[(A, "kill"), (B, "ski"), (C, "cook")]),
        ]);
        assert_eq!(
            most_popular_role(ChefId::AssafGranit, &report),
            Some((Role::Cook, 1))
        );
    }

    #[test]
    fn test_empty_input_is_dense_and_zero() {
        let report = aggregate(&[]);
        assert_eq!(report, StatsReport::empty());
        assert_eq!(report.total_responses, 0);
        for chef in ChefId::ALL {
            assert_eq!(report.chef_role_counts[&chef].len(), 3);
            for role in Role::ALL {
                assert_eq!(report.count(chef, role), 0);
            }
            assert_eq!(most_popular_role(chef, &report), None);
        }
        assert!(report.most_popular_roles().is_empty());
    }

    #[test]
    fn test_damaged_record_only_loses_its_own_answers() {
        let report = aggregate(&[
            submission(&[(A, "ski"), (B, "cook"), (C, "kill")]),
            // missing chef and unknown role
            submission(&[(A, "bake"), (B, "cook")]),
        ]);

        assert_eq!(report.total_responses, 2);
        assert_eq!(report.count(ChefId::AssafGranit, Role::Ski), 1);
        assert_eq!(report.count(ChefId::YossiShitrit, Role::Cook), 2);
        assert_eq!(report.count(ChefId::MoshikRoth, Role::Kill), 1);
        let assaf_total: u64 = report.chef_role_counts[&ChefId::AssafGranit]
            .values()
            .sum();
        assert_eq!(assaf_total, 1);
    }

    #[test]
    fn test_most_popular_roles_lists_chefs_in_catalog_order() {
        let report = aggregate(&three_submissions());
        let popular = report.most_popular_roles();
        assert_eq!(popular.len(), 3);
        assert_eq!(popular[0].chef_id, ChefId::AssafGranit);
        assert_eq!(popular[2].role, Role::Kill);
        assert_eq!(
            serde_json::to_value(popular[0]).unwrap(),
            serde_json::json!({"chefId": "assaf-granit", "role": "ski", "count": 2})
        );
    }
}
