use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shelflife_core::RunId;

use crate::context::{RunContext, TriggerSource};
use crate::error::{SystemError, TransportError};

/// Lifecycle of a run: `Running -> {Completed, Aborted}`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Aborted,
}

/// Aggregate outcome of one expiry-check run.
///
/// Created fresh when a run starts and owned by the runner until it is
/// returned to the trigger. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
    pub run_id: RunId,
    pub trigger: TriggerSource,
    /// Reference date every owner is evaluated against.
    pub as_of: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Owners returned by enumeration.
    pub owners_scanned: usize,
    /// Owners with at least one qualifying item (a dispatch was attempted).
    pub owners_notified: usize,
    pub notifications_sent: usize,
    pub dispatch_failures: usize,
    pub failures: Vec<TransportError>,

    pub abort_reason: Option<String>,
    pub status: RunStatus,
}

impl ExecutionReport {
    pub fn begin(ctx: &RunContext, as_of: NaiveDate, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: ctx.run_id(),
            trigger: ctx.trigger(),
            as_of,
            started_at,
            finished_at: None,
            owners_scanned: 0,
            owners_notified: 0,
            notifications_sent: 0,
            dispatch_failures: 0,
            failures: Vec::new(),
            abort_reason: None,
            status: RunStatus::Running,
        }
    }

    pub fn record_owners(&mut self, count: usize) {
        self.owners_scanned = count;
    }

    pub fn record_sent(&mut self) {
        self.owners_notified += 1;
        self.notifications_sent += 1;
    }

    pub fn record_failure(&mut self, error: TransportError) {
        self.owners_notified += 1;
        self.dispatch_failures += 1;
        self.failures.push(error);
    }

    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.status = RunStatus::Completed;
        self.finished_at = Some(at);
    }

    pub fn abort(&mut self, error: &SystemError, at: DateTime<Utc>) {
        self.status = RunStatus::Aborted;
        self.abort_reason = Some(error.to_string());
        self.finished_at = Some(at);
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Human-readable error summaries: the abort reason (if any) followed by
    /// one line per failed dispatch.
    pub fn error_summaries(&self) -> Vec<String> {
        self.abort_reason
            .iter()
            .cloned()
            .chain(self.failures.iter().map(|f| f.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use shelflife_core::OwnerId;

    fn report() -> ExecutionReport {
        let ctx = RunContext::new(TriggerSource::Manual);
        ExecutionReport::begin(&ctx, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), Utc::now())
    }

    #[test]
    fn starts_running_with_zero_counts() {
        let r = report();
        assert_eq!(r.status, RunStatus::Running);
        assert_eq!(r.notifications_sent + r.dispatch_failures + r.owners_notified, 0);
    }

    #[test]
    fn failure_counts_as_notified_but_not_sent() {
        let mut r = report();
        r.record_sent();
        r.record_failure(TransportError {
            owner_id: OwnerId::new(),
            address: "x@example.com".to_string(),
            cause: "refused".to_string(),
        });
        r.complete(Utc::now());

        assert_eq!(r.owners_notified, 2);
        assert_eq!(r.notifications_sent, 1);
        assert_eq!(r.dispatch_failures, 1);
        assert!(r.is_success());
        assert_eq!(r.error_summaries().len(), 1);
    }

    #[test]
    fn abort_records_reason_first() {
        let mut r = report();
        r.record_failure(TransportError {
            owner_id: OwnerId::new(),
            address: "x@example.com".to_string(),
            cause: "refused".to_string(),
        });
        r.abort(
            &SystemError::OwnerEnumeration(StoreError::Unavailable("down".into())),
            Utc::now(),
        );

        assert_eq!(r.status, RunStatus::Aborted);
        assert!(!r.is_success());
        let errors = r.error_summaries();
        assert_eq!(errors[0], "owner enumeration failed: store unavailable: down");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn serializes_status_in_snake_case() {
        let mut r = report();
        r.complete(Utc::now());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["trigger"], "manual");
    }
}
