use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use shelflife_alerts::{ExecutionReport, ValidationError};
use shelflife_core::RunId;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestNotificationRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

/// Decode an optional JSON body: empty means `T::default()`, anything else
/// must parse.
pub fn parse_optional_json<T>(body: &[u8]) -> Result<T, axum::response::Response>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        errors::validation_error(ValidationError::invalid("body", e.to_string()))
    })
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ExpiryCheckResponse {
    pub success: bool,
    pub total_owners: usize,
    pub notifications_sent: usize,
    pub errors: Vec<String>,
    pub report: ExecutionReport,
}

impl ExpiryCheckResponse {
    /// `200` for a completed run, `503` for an aborted one.
    pub fn status(&self) -> StatusCode {
        if self.success {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

impl From<ExecutionReport> for ExpiryCheckResponse {
    fn from(report: ExecutionReport) -> Self {
        Self {
            success: report.is_success(),
            total_owners: report.owners_scanned,
            notifications_sent: report.notifications_sent,
            errors: report.error_summaries(),
            report,
        }
    }
}

/// Body of a `409`: same summary fields as a finished run, all empty.
#[derive(Debug, Serialize)]
pub struct SkippedResponse {
    pub success: bool,
    pub skipped: bool,
    pub active_run: RunId,
    pub total_owners: usize,
    pub notifications_sent: usize,
    pub errors: Vec<String>,
}

impl SkippedResponse {
    pub fn new(active_run: RunId) -> Self {
        Self {
            success: false,
            skipped: true,
            active_run,
            total_owners: 0,
            notifications_sent: 0,
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub owners_count: usize,
    pub items_count: usize,
    pub run_active: bool,
}

#[derive(Debug, Serialize)]
pub struct TestNotificationResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_blank_body_means_default() {
        let req: TestNotificationRequest = parse_optional_json(b"").unwrap();
        assert!(req.address.is_empty());
        let req: TestNotificationRequest = parse_optional_json(b" \n").unwrap();
        assert!(req.name.is_empty());
    }

    #[test]
    fn malformed_body_is_a_bad_request() {
        let resp = parse_optional_json::<TestNotificationRequest>(b"{not json").unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = parse_optional_json::<TestNotificationRequest>(br#"{"email":"x"}"#).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
