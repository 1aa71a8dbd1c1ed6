//! Application module
//!
//! This module contains application-level functionality including:
//! - Configuration loading
//! - Logging setup
//! - Runtime initialization
//! - Fatal error reporting

pub mod config;
pub mod error_handling;
pub mod logging;
pub mod runtime;

// Re-export main application functions
pub use config::{AppConfig, ServerConfig, SurveyConfig, DEFAULT_CONFIG_FILE};
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
pub use runtime::{initialize_app, open_storage};
