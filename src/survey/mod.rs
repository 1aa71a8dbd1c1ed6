//! Survey domain: the chef/role catalog, the assignment engine, the submission
//! validator and the statistics built from stored submissions.
//!
//! Everything in this module is synchronous and free of I/O; persistence and
//! access control live in [`crate::storage`] and [`crate::auth`].

pub mod assignment;
pub mod catalog;
pub mod export;
pub mod stats;
pub mod submission;
pub mod validation;

pub use assignment::{AssignmentError, AssignmentSet};
pub use catalog::{Catalog, Chef, ChefId, Role, RoleInfo, CHEFS};
pub use export::{export_filename, submissions_to_csv, ExportError};
pub use stats::{aggregate, most_popular_role, PopularRole, StatsReport};
pub use submission::{Submission, SubmissionRequest};
pub use validation::{validate_submission, Responses, ValidatedResponses, ValidationError};
