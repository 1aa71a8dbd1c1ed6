//! REST API for the survey
//!
//! Public endpoints take submissions and serve the catalog, statistics and
//! comments. Raw results, export and reset need an admin bearer token from
//! `/api/auth/signin`.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use server::{build_router, ApiServer, ApiState};
