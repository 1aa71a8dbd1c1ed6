//! Persisted survey submissions and the request shape that produces them

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use super::validation::{validate_submission, Responses, ValidationError};

/// Incoming submission as sent by clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub responses: Responses,
}

/// A stored, immutable survey response
///
/// Responses stay in wire form so a damaged record can still be loaded and
/// skipped field by field when aggregating. Loading never fails on a field
/// of the wrong type: missing or mistyped fields fall back to empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    /// Milliseconds since the Unix epoch; 0 when the stored value was unusable
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "lenient_responses")]
    pub responses: Responses,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_i64() {
        Some(millis) => millis,
        None => {
            warn!("Stored submission has an unusable timestamp: {}", value);
            0
        }
    })
}

/// Keep the string answers of a stored record and drop everything else
fn lenient_responses<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Responses, D::Error> {
    let Value::Object(answers) = Value::deserialize(deserializer)? else {
        warn!("Stored submission has no response map");
        return Ok(Responses::new());
    };

    Ok(answers
        .into_iter()
        .filter_map(|(chef, role)| match role {
            Value::String(role) => Some((chef, role)),
            other => {
                warn!("Dropping non-text answer for {}: {}", chef, other);
                None
            }
        })
        .collect())
}

impl Submission {
    /// Validate a request and stamp it with a fresh id and the current time
    pub fn from_request(request: SubmissionRequest) -> Result<Self, ValidationError> {
        Self::from_request_at(request, Utc::now())
    }

    pub fn from_request_at(
        request: SubmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let validated = validate_submission(&request.name, &request.responses)?;
        let email = request
            .email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            email,
            timestamp: now.timestamp_millis(),
            responses: validated.to_responses(),
        })
    }

    /// When the response was recorded, if the stored timestamp is usable
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        if self.timestamp <= 0 {
            return None;
        }
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}
