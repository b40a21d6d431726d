use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use cron::Schedule;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use shelflife_alerts::{RunContext, TriggerSource, ValidationError};

use crate::clock::Clock;
use crate::expiry::{ExpiryCheckRunner, RunOutcome};

/// Time-based trigger: runs the expiry check on a cron schedule.
///
/// Schedule expressions use the six-field `cron` syntax with seconds, e.g.
/// `"0 0 9 * * *"` for 09:00 every day, evaluated in local time.
#[derive(Debug, Clone)]
pub struct RecurringTrigger {
    expression: String,
    schedule: Schedule,
}

impl RecurringTrigger {
    pub fn new(expression: &str) -> Result<Self, ValidationError> {
        let expression = expression.trim();
        let schedule = Schedule::from_str(expression).map_err(|e| {
            ValidationError::invalid("schedule", format!("invalid cron '{expression}': {e}"))
        })?;
        Ok(Self {
            expression: expression.to_string(),
            schedule,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First fire time strictly after `after`, if the schedule has one.
    pub fn next_fire_after(&self, after: DateTime<Local>) -> Option<DateTime<Local>> {
        self.schedule.after(&after).next()
    }

    /// Spawn the trigger loop on the current tokio runtime.
    ///
    /// - Schedule: fires at every cron tick
    /// - Manual nudge: `handle.trigger()` requests an immediate run
    /// - Results: logged only; a skipped or aborted run never stops the loop
    pub fn spawn(
        &self,
        name: &'static str,
        runner: Arc<ExpiryCheckRunner>,
        clock: Arc<dyn Clock>,
    ) -> RecurringTriggerHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let (trigger_tx, trigger_rx) = mpsc::channel::<()>(1);

        let cfg = self.clone();
        let join = tokio::spawn(trigger_loop(name, cfg, runner, clock, shutdown_rx, trigger_rx));

        RecurringTriggerHandle {
            shutdown: shutdown_tx,
            trigger: trigger_tx,
            join: Some(join),
        }
    }
}

/// Handle for the running trigger (shutdown + immediate-run hook).
#[derive(Debug)]
pub struct RecurringTriggerHandle {
    shutdown: mpsc::Sender<()>,
    trigger: mpsc::Sender<()>,
    join: Option<JoinHandle<()>>,
}

impl RecurringTriggerHandle {
    /// Request an immediate run.
    ///
    /// Coalesced: if a request is already pending this is a no-op.
    pub fn trigger(&self) {
        let _ = self.trigger.try_send(());
    }

    /// Stop the loop and wait for it to finish (including any run in flight).
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(()).await;
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

async fn trigger_loop(
    name: &'static str,
    cfg: RecurringTrigger,
    runner: Arc<ExpiryCheckRunner>,
    clock: Arc<dyn Clock>,
    mut shutdown_rx: mpsc::Receiver<()>,
    mut trigger_rx: mpsc::Receiver<()>,
) {
    info!(trigger = name, schedule = cfg.expression(), "recurring trigger started");

    // Last schedule tick that fired; never fire a tick at or before it again,
    // even if the wall clock steps backwards.
    let mut last_tick: Option<DateTime<Local>> = None;

    loop {
        let now = clock.now();
        let from = last_tick.map_or(now, |tick| tick.max(now));
        let next = match cfg.next_fire_after(from) {
            Some(at) => Some((at, (at - now).to_std().unwrap_or(Duration::ZERO))),
            None => {
                warn!(trigger = name, "schedule has no upcoming fire time; waiting for manual nudges only");
                None
            }
        };

        tokio::select! {
            // Shutdown has priority; a dropped handle counts as shutdown.
            biased;
            _ = shutdown_rx.recv() => break,
            Some(()) = trigger_rx.recv() => fire(name, &runner, clock.as_ref()).await,
            tick = sleep_until_tick(next) => {
                last_tick = Some(tick);
                fire(name, &runner, clock.as_ref()).await;
            }
        }
    }

    info!(trigger = name, "recurring trigger stopped");
}

async fn sleep_until_tick(next: Option<(DateTime<Local>, Duration)>) -> DateTime<Local> {
    match next {
        Some((tick, delay)) => {
            tokio::time::sleep(delay).await;
            tick
        }
        None => std::future::pending().await,
    }
}

async fn fire(name: &'static str, runner: &ExpiryCheckRunner, clock: &dyn Clock) {
    let ctx = RunContext::new(TriggerSource::Recurring);

    match runner.run(&ctx, clock.today()).await {
        RunOutcome::Finished(report) if report.is_success() => {
            info!(
                parent: ctx.span(),
                trigger = name,
                owners = report.owners_scanned,
                sent = report.notifications_sent,
                failures = report.dispatch_failures,
                "scheduled expiry check finished"
            );
        }
        RunOutcome::Finished(report) => {
            error!(
                parent: ctx.span(),
                trigger = name,
                reason = report.abort_reason.as_deref().unwrap_or("unknown"),
                sent = report.notifications_sent,
                "scheduled expiry check aborted"
            );
        }
        RunOutcome::Skipped { active_run } => {
            warn!(
                parent: ctx.span(),
                trigger = name,
                active_run = %active_run,
                "scheduled expiry check skipped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rejects_invalid_expression() {
        let err = RecurringTrigger::new("every morning").unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "schedule", .. }));
    }

    #[test]
    fn daily_nine_am_fires_same_day_before_nine_and_next_day_after() {
        let trigger = RecurringTrigger::new("0 0 9 * * *").unwrap();

        let early = Local.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let next = trigger.next_fire_after(early).unwrap();
        assert_eq!(next, Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap());

        let late = Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let next = trigger.next_fire_after(late).unwrap();
        assert_eq!(next, Local.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap());
    }
}
