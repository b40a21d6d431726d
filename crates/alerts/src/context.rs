use serde::{Deserialize, Serialize};
use tracing::Span;

use shelflife_core::RunId;

/// Which entry point started a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    Recurring,
    Manual,
}

impl TriggerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Recurring => "recurring",
            TriggerSource::Manual => "manual",
        }
    }
}

/// Per-run logging/reporting context.
///
/// Created by a trigger and passed explicitly into the runner; every log line
/// emitted during the run is recorded inside `span`, so it carries `run_id`
/// and `trigger` without any process-wide state.
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: RunId,
    trigger: TriggerSource,
    span: Span,
}

impl RunContext {
    pub fn new(trigger: TriggerSource) -> Self {
        Self::with_run_id(RunId::new(), trigger)
    }

    pub fn with_run_id(run_id: RunId, trigger: TriggerSource) -> Self {
        let span = tracing::info_span!(
            "expiry_check",
            run_id = %run_id,
            trigger = trigger.as_str(),
        );
        Self {
            run_id,
            trigger,
            span,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn trigger(&self) -> TriggerSource {
        self.trigger
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
