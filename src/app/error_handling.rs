//! Error handling utilities

use tracing::{debug, error};

use crate::error::SurveyError;

/// Exit code and message for an error reaching the top of the binary
///
/// `SurveyError`s get their user message and their own exit code. When
/// verbose, failures outside the caller's control also get the cause chain.
/// Anything else prints its chain and exits with 1.
pub fn describe_fatal_error(error: &anyhow::Error, verbose: u8) -> (i32, String) {
    if let Some(survey_err) = error.downcast_ref::<SurveyError>() {
        let mut message = survey_err.user_message();
        if verbose >= 1 && !survey_err.is_client_error() {
            message.push_str(&format!("\n\nContext Chain:\n{}", survey_err.developer_message()));
        }
        return (survey_err.exit_code(), message);
    }

    let mut message = format!("Error: {error}");
    if verbose >= 1 {
        message.push_str("\n\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            message.push_str(&format!("\n  {}: {}", i, cause));
        }
    }
    (1, message)
}

/// Whether the user can fix the failure by changing the command
pub fn is_client_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<SurveyError>()
        .is_some_and(SurveyError::is_client_error)
}

/// Handle fatal errors and exit with appropriate status code
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    if is_client_error(&error) {
        debug!("Command rejected: {}", error);
    } else {
        error!("Fatal error: {}", error);
    }

    let (exit_code, message) = describe_fatal_error(&error, verbose);
    eprintln!("{message}");
    std::process::exit(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use crate::survey::ValidationError;

    #[test]
    fn test_survey_errors_use_their_exit_code() {
        let error = anyhow::Error::new(SurveyError::from(ValidationError::MissingName));
        let (code, message) = describe_fatal_error(&error, 0);
        assert_eq!(code, 8);
        assert_eq!(message, "Name is required");
    }

    #[test]
    fn test_verbose_chain_only_for_failures_outside_the_callers_control() {
        let rejected = anyhow::Error::new(SurveyError::from(ValidationError::MissingName));
        assert!(is_client_error(&rejected));
        assert_eq!(describe_fatal_error(&rejected, 2).1, "Name is required");

        let broken = anyhow::Error::new(SurveyError::from(StorageError::serialization(
            "responses.json: EOF",
        )));
        assert!(!is_client_error(&broken));
        let (code, message) = describe_fatal_error(&broken, 1);
        assert_eq!(code, 4);
        assert!(message.contains("Context Chain:"));
        assert!(message.contains("responses.json: EOF"));

        assert!(!is_client_error(&anyhow::anyhow!("root cause")));
    }

    #[test]
    fn test_other_errors_show_chain_when_verbose() {
        let error = anyhow::anyhow!("root cause").context("while loading");
        let (code, message) = describe_fatal_error(&error, 1);
        assert_eq!(code, 1);
        assert!(message.starts_with("Error: while loading"));
        assert!(message.contains("1: root cause"));
    }
}
