//! Comments left on the survey: root comments, one level of replies and a
//! like counter per comment.

pub mod models;
pub mod service;

pub use models::{Comment, CommentThread, NewComment};
pub use service::{build_threads, CommentError, CommentService};
