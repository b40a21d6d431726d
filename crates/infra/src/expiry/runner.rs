use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info, warn, Instrument};

use shelflife_alerts::{AlertComposer, ExecutionReport, RunContext};
use shelflife_core::RunId;

use super::dispatcher::NotificationDispatcher;
use super::query::ExpiryQuery;

/// Result of asking the runner to run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The run executed and reached a terminal state (`Completed` or `Aborted`).
    Finished(ExecutionReport),
    /// Another run was already active; nothing was done.
    Skipped { active_run: RunId },
}

/// The single scan-and-notify loop shared by every trigger.
///
/// Single-flight: at most one run is active at a time. A run requested while
/// another is in progress is rejected immediately as [`RunOutcome::Skipped`]
/// (no waiting, no queueing), so overlapping triggers can never notify the
/// same owner twice for the same items.
pub struct ExpiryCheckRunner {
    query: ExpiryQuery,
    composer: AlertComposer,
    dispatcher: NotificationDispatcher,
    active: Mutex<Option<RunId>>,
}

/// Releases the single-flight slot when the run ends, however it ends.
struct ActiveRun<'a> {
    slot: &'a Mutex<Option<RunId>>,
}

impl Drop for ActiveRun<'_> {
    fn drop(&mut self) {
        *lock_slot(self.slot) = None;
    }
}

fn lock_slot(slot: &Mutex<Option<RunId>>) -> MutexGuard<'_, Option<RunId>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ExpiryCheckRunner {
    pub fn new(query: ExpiryQuery, composer: AlertComposer, dispatcher: NotificationDispatcher) -> Self {
        Self {
            query,
            composer,
            dispatcher,
            active: Mutex::new(None),
        }
    }

    /// Id of the run currently in progress, if any.
    pub fn active_run(&self) -> Option<RunId> {
        *lock_slot(&self.active)
    }

    /// Execute one full pass over all owners against reference date `as_of`.
    pub async fn run(&self, ctx: &RunContext, as_of: NaiveDate) -> RunOutcome {
        let _active = match self.try_begin(ctx.run_id()) {
            Ok(active) => active,
            Err(active_run) => {
                warn!(
                    parent: ctx.span(),
                    active_run = %active_run,
                    "expiry check skipped: another run is in progress"
                );
                return RunOutcome::Skipped { active_run };
            }
        };

        let report = self.execute(ctx, as_of).instrument(ctx.span().clone()).await;
        RunOutcome::Finished(report)
    }

    fn try_begin(&self, run_id: RunId) -> Result<ActiveRun<'_>, RunId> {
        let mut slot = lock_slot(&self.active);
        if let Some(active) = *slot {
            return Err(active);
        }
        *slot = Some(run_id);
        Ok(ActiveRun { slot: &self.active })
    }

    async fn execute(&self, ctx: &RunContext, as_of: NaiveDate) -> ExecutionReport {
        let mut report = ExecutionReport::begin(ctx, as_of, Utc::now());
        info!(as_of = %as_of, "expiry check started");

        let owners = match self.query.list_owners().await {
            Ok(owners) => owners,
            Err(e) => {
                error!(error = %e, "expiry check aborted");
                report.abort(&e, Utc::now());
                return report;
            }
        };
        report.record_owners(owners.len());

        for owner in &owners {
            let owner_id = owner.id_typed();

            let items = match self.query.select_expiring(owner_id, as_of).await {
                Ok(items) => items,
                Err(e) => {
                    error!(owner_id = %owner_id, error = %e, "expiry check aborted");
                    report.abort(&e, Utc::now());
                    return report;
                }
            };

            let Some(notification) = self.composer.compose(owner, &items) else {
                debug!(owner_id = %owner_id, "no items expiring");
                continue;
            };

            match self.dispatcher.dispatch(owner, &notification).await {
                Ok(_sent) => {
                    info!(
                        owner_id = %owner_id,
                        address = owner.contact_address(),
                        items = items.len(),
                        "expiry alert sent"
                    );
                    report.record_sent();
                }
                Err(e) => {
                    warn!(owner_id = %owner_id, error = %e, "expiry alert dispatch failed");
                    report.record_failure(e);
                }
            }
        }

        report.complete(Utc::now());
        info!(
            owners = report.owners_scanned,
            notified = report.owners_notified,
            sent = report.notifications_sent,
            failures = report.dispatch_failures,
            "expiry check completed"
        );
        report
    }
}
