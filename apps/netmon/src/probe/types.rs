use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only status that counts as the target being up.
pub const SUCCESS_STATUS: StatusCode = StatusCode::OK;

/// Why a probe reported its target as down.
///
/// The `Display` form is what ends up in [`ProbeResult::error_text`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// No response was received (DNS, connect, TLS, timeout...).
    #[error("{0}")]
    Transport(String),

    /// A response arrived but its status is not [`SUCCESS_STATUS`].
    #[error("HTTP {status}, {detail}")]
    NonSuccessStatus { status: StatusCode, detail: BodyDetail },
}

/// What could be read from the body of a non-success response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyDetail {
    Content(String),
    ReadFailed(String),
}

impl fmt::Display for BodyDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyDetail::Content(content) => write!(f, "Content: \"{content}\""),
            BodyDetail::ReadFailed(error) => write!(f, "failed reading response body: {error}"),
        }
    }
}

/// Outcome of a single reachability check.
///
/// `id` stays `None` until the record has been written to the result store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub id: Option<i64>,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub status_code: u16,
    pub success: bool,
    pub error_text: String,
    pub duration_millis: f64,
}

impl ProbeResult {
    /// Start a new result for `url`, stamped with the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision the store
    /// keeps, so a saved result reads back identical.
    pub fn started(url: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            created_at: Utc::now().trunc_subsecs(6),
            status_code: 0,
            success: false,
            error_text: String::new(),
            duration_millis: 0.0,
        }
    }

    /// Mark the probe as up.
    pub fn up(mut self, duration_millis: f64) -> Self {
        self.status_code = SUCCESS_STATUS.as_u16();
        self.success = true;
        self.error_text.clear();
        self.duration_millis = duration_millis;
        self
    }

    /// Mark the probe as down.
    pub fn down(mut self, failure: &ProbeFailure, duration_millis: f64) -> Self {
        self.status_code = match failure {
            ProbeFailure::Transport(_) => 0,
            ProbeFailure::NonSuccessStatus { status, .. } => status.as_u16(),
        };
        self.success = false;
        self.error_text = failure.to_string();
        self.duration_millis = duration_millis;
        self
    }

    /// Attach the identifier assigned by the store.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        write!(
            f,
            "ProbeResult{{id: {id}, url: {}, created_at: {}, status: {}, success: {}, duration_ms: {:.3}, error: `{}`}}",
            self.url,
            self.created_at.to_rfc3339(),
            self.status_code,
            self.success,
            self.duration_millis,
            self.error_text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_clears_error_and_sets_canonical_status() {
        let result = ProbeResult::started("https://example.com/").up(12.5);
        assert!(result.success);
        assert_eq!(result.status_code, 200);
        assert_eq!(result.error_text, "");
        assert_eq!(result.duration_millis, 12.5);
        assert_eq!(result.id, None);
    }

    #[test]
    fn test_transport_failure_has_zero_status() {
        let failure = ProbeFailure::Transport("connection refused".to_string());
        let result = ProbeResult::started("http://127.0.0.1:1/").down(&failure, 0.4);
        assert!(!result.success);
        assert_eq!(result.status_code, 0);
        assert_eq!(result.error_text, "connection refused");
    }

    #[test]
    fn test_non_success_status_text_contains_reason_and_body() {
        let failure = ProbeFailure::NonSuccessStatus {
            status: StatusCode::NOT_FOUND,
            detail: BodyDetail::Content("missing".to_string()),
        };
        let result = ProbeResult::started("https://example.com/x").down(&failure, 3.0);
        assert_eq!(result.status_code, 404);
        assert_eq!(result.error_text, "HTTP 404 Not Found, Content: \"missing\"");
    }

    #[test]
    fn test_body_read_failure_is_reported() {
        let failure = ProbeFailure::NonSuccessStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
            detail: BodyDetail::ReadFailed("stream reset".to_string()),
        };
        assert_eq!(
            failure.to_string(),
            "HTTP 503 Service Unavailable, failed reading response body: stream reset"
        );
    }

    #[test]
    fn test_started_timestamp_has_microsecond_precision() {
        let result = ProbeResult::started("https://example.com/");
        assert_eq!(result.created_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let result = ProbeResult::started("https://example.com/").up(1.0).with_id(7);
        let value = serde_json::to_value(&result).unwrap();
        for field in ["id", "url", "createdAt", "statusCode", "success", "errorText", "durationMillis"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["id"], 7);
    }
}
