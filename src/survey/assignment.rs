//! In-progress role assignments for a single respondent
//!
//! An [`AssignmentSet`] always has an entry for every catalog chef and never
//! lets two chefs hold the same role. Assigning a role that is already taken
//! moves it to the new chef instead of duplicating it.

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::{ChefId, Role};
use super::validation::{validate_submission, Responses, ValidatedResponses, ValidationError};

/// Raised when string ids from the outside do not name catalog entries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("Invalid chef or role: {chef_id}={role_id}")]
    InvalidEntityOrRole { chef_id: String, role_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSet {
    assignments: BTreeMap<ChefId, Option<Role>>,
}

impl Default for AssignmentSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentSet {
    /// Every chef present and unassigned
    pub fn new() -> Self {
        Self {
            assignments: ChefId::ALL.into_iter().map(|chef| (chef, None)).collect(),
        }
    }

    /// Give `role` to `chef`, taking it away from whichever chef held it
    pub fn assign_role(&mut self, chef: ChefId, role: Role) {
        if let Some(holder) = self.holder_of(role) {
            if holder != chef {
                self.assignments.insert(holder, None);
            }
        }
        self.assignments.insert(chef, Some(role));
    }

    /// String form of [`AssignmentSet::assign_role`] for untyped input
    pub fn assign_by_id(&mut self, chef_id: &str, role_id: &str) -> Result<(), AssignmentError> {
        match (ChefId::parse(chef_id), Role::parse(role_id)) {
            (Some(chef), Some(role)) => {
                self.assign_role(chef, role);
                Ok(())
            }
            _ => Err(AssignmentError::InvalidEntityOrRole {
                chef_id: chef_id.to_string(),
                role_id: role_id.to_string(),
            }),
        }
    }

    /// Free whatever role `chef` holds; no-op when unassigned
    pub fn clear_assignment(&mut self, chef: ChefId) {
        self.assignments.insert(chef, None);
    }

    pub fn reset_all(&mut self) {
        for role in self.assignments.values_mut() {
            *role = None;
        }
    }

    /// Roles currently held by some chef
    pub fn used_roles(&self) -> BTreeSet<Role> {
        self.assignments.values().flatten().copied().collect()
    }

    /// Roles nobody holds yet, in catalog order
    pub fn available_roles(&self) -> Vec<Role> {
        let used = self.used_roles();
        Role::ALL
            .into_iter()
            .filter(|role| !used.contains(role))
            .collect()
    }

    pub fn role_of(&self, chef: ChefId) -> Option<Role> {
        self.assignments.get(&chef).copied().flatten()
    }

    pub fn holder_of(&self, role: Role) -> Option<ChefId> {
        self.assignments
            .iter()
            .find(|(_, held)| **held == Some(role))
            .map(|(chef, _)| *chef)
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments.values().filter(|role| role.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.assigned_count() == ChefId::ALL.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChefId, Option<Role>)> + '_ {
        self.assignments.iter().map(|(chef, role)| (*chef, *role))
    }

    /// Wire form of the assigned entries; unassigned chefs are left out
    pub fn responses(&self) -> Responses {
        self.assignments
            .iter()
            .filter_map(|(chef, role)| {
                role.map(|role| (chef.as_str().to_string(), role.as_str().to_string()))
            })
            .collect()
    }

    /// Run the submission validator against the current state
    pub fn validate(&self, name: &str) -> Result<ValidatedResponses, ValidationError> {
        validate_submission(name, &self.responses())
    }
}
