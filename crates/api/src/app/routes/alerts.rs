use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use shelflife_infra::expiry::RunOutcome;
use shelflife_infra::triggers::ManualTriggerRequest;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/expiry-check", post(run_expiry_check))
        .route("/status", get(status))
        .route("/test-notification", post(send_test_notification))
}

/// Run the expiry check now and report what happened.
pub async fn run_expiry_check(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let request: ManualTriggerRequest = match dto::parse_optional_json(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.manual().invoke(request).await {
        Ok(RunOutcome::Finished(report)) => {
            let body = dto::ExpiryCheckResponse::from(report);
            (body.status(), Json(body)).into_response()
        }
        Ok(RunOutcome::Skipped { active_run }) => {
            (StatusCode::CONFLICT, Json(dto::SkippedResponse::new(active_run))).into_response()
        }
        Err(e) => errors::manual_trigger_error_to_response(e),
    }
}

pub async fn status(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let store = services.store();
    let counts = (store.count_owners().await, store.count_items().await);

    match counts {
        (Ok(owners_count), Ok(items_count)) => Json(dto::StatusResponse {
            status: "running",
            timestamp: Utc::now(),
            owners_count,
            items_count,
            run_active: services.runner().active_run().is_some(),
        })
        .into_response(),
        (Err(e), _) | (_, Err(e)) => {
            errors::json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", e.to_string())
        }
    }
}

/// Send a canned message to an arbitrary address to check the transport.
pub async fn send_test_notification(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let request: dto::TestNotificationRequest = match dto::parse_optional_json(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.probe().send_test(&request.address, &request.name).await {
        Ok(()) => Json(dto::TestNotificationResponse {
            success: true,
            message: format!("test notification sent to {}", request.address.trim()),
        })
        .into_response(),
        Err(e) => errors::probe_error_to_response(e),
    }
}
