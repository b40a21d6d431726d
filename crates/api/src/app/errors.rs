use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shelflife_alerts::ValidationError;
use shelflife_infra::transport::ProbeError;
use shelflife_infra::triggers::ManualTriggerError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn validation_error(err: ValidationError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
}

pub fn manual_trigger_error_to_response(err: ManualTriggerError) -> axum::response::Response {
    match err {
        ManualTriggerError::Validation(e) => validation_error(e),
        ManualTriggerError::Task(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
}

pub fn probe_error_to_response(err: ProbeError) -> axum::response::Response {
    match err {
        ProbeError::Validation(e) => validation_error(e),
        e @ ProbeError::Transport(_) => json_error(StatusCode::BAD_GATEWAY, "transport_error", e.to_string()),
        e @ ProbeError::Timeout { .. } => {
            json_error(StatusCode::GATEWAY_TIMEOUT, "transport_timeout", e.to_string())
        }
    }
}
