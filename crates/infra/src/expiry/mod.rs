//! Expiry-check orchestration: query, dispatch, and the run loop tying them
//! together.
//!
//! Failures are isolated per owner; only systemic store failures abort a run.

pub mod dispatcher;
pub mod query;
pub mod runner;

pub use dispatcher::{NotificationDispatcher, Sent};
pub use query::ExpiryQuery;
pub use runner::{ExpiryCheckRunner, RunOutcome};

use std::future::Future;
use std::time::Duration;

use shelflife_alerts::SystemError;

/// Bound a store call; elapsing is a systemic failure.
pub(crate) async fn bounded<F: Future>(
    operation: &'static str,
    limit: Duration,
    fut: F,
) -> Result<F::Output, SystemError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| SystemError::Timeout {
            operation,
            timeout_ms: limit.as_millis() as u64,
        })
}
