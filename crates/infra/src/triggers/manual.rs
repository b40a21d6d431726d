use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use shelflife_alerts::{RunContext, TriggerSource, ValidationError};

use crate::clock::Clock;
use crate::expiry::{ExpiryCheckRunner, RunOutcome};

/// Input accepted by the on-demand trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManualTriggerRequest {
    /// Reference date (`YYYY-MM-DD`); defaults to today.
    #[serde(default)]
    pub as_of: Option<String>,
}

#[derive(Debug, Error)]
pub enum ManualTriggerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("expiry check task failed: {0}")]
    Task(String),
}

/// On-demand trigger: runs the expiry check synchronously for a caller and
/// hands back the outcome.
#[derive(Clone)]
pub struct ManualTrigger {
    runner: Arc<ExpiryCheckRunner>,
    clock: Arc<dyn Clock>,
}

impl ManualTrigger {
    pub fn new(runner: Arc<ExpiryCheckRunner>, clock: Arc<dyn Clock>) -> Self {
        Self { runner, clock }
    }

    pub async fn invoke(&self, request: ManualTriggerRequest) -> Result<RunOutcome, ManualTriggerError> {
        let as_of = match parse_as_of(request.as_of.as_deref())? {
            Some(date) => date,
            None => self.clock.today(),
        };

        let ctx = RunContext::new(TriggerSource::Manual);
        info!(parent: ctx.span(), as_of = %as_of, "manual expiry check requested");

        // Run on its own task so a caller going away cannot cancel a run midway.
        let runner = self.runner.clone();
        let outcome = tokio::spawn(async move { runner.run(&ctx, as_of).await })
            .await
            .map_err(|e| {
                warn!(error = %e, "manual expiry check task failed");
                ManualTriggerError::Task(e.to_string())
            })?;

        Ok(outcome)
    }
}

fn parse_as_of(raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::invalid("as_of", format!("expected YYYY-MM-DD, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_and_treats_blank_as_today() {
        assert_eq!(parse_as_of(None).unwrap(), None);
        assert_eq!(parse_as_of(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_as_of(Some("2025-02-28")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["28/02/2025", "2025-02-30", "tomorrow"] {
            let err = parse_as_of(Some(bad)).unwrap_err();
            assert!(matches!(err, ValidationError::Invalid { field: "as_of", .. }), "{bad}");
        }
    }
}
