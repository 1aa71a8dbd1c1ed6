//! Command implementation modules

pub mod admin;
pub mod serve;
pub mod survey;

// Re-export command execution functions
pub use admin::{run_export_command, run_reset_command, run_results_command};
pub use serve::run_serve_command;
pub use survey::{run_catalog_command, run_stats_command, run_submit_command};
