//! # Chef Survey
//!
//! Respondents give each of three chefs exactly one of three roles. This
//! crate holds the assignment rules, the shared submission validator, the
//! aggregation of stored responses, and the HTTP API and CLI that host them.
//!
//! ## Modules
//!
//! - `survey` - Catalog, assignment engine, validation, aggregation and CSV export
//! - `storage` - Record store trait with file and in-memory backends
//! - `auth` - Access gate and admin bearer sessions
//! - `service` - Survey operations with privilege checks
//! - `comments` - Threaded comments with likes
//! - `api` - axum HTTP API
//! - `app` - Configuration, logging and fatal error handling
//! - `cli` - `chef-survey` command line
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod comments;
pub mod error;
pub mod service;
pub mod storage;
pub mod survey;

pub use error::{Result, SurveyError};
