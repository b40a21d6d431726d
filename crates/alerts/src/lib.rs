//! `shelflife-alerts`
//!
//! **Responsibility:** the storage/runtime agnostic half of the expiry-alert
//! subsystem.
//!
//! - Ports for the collaborators the subsystem consumes (inventory store,
//!   message transport).
//! - The error taxonomy (validation / transport / system).
//! - Notification composition (pure, deterministic).
//! - The per-run execution report and the run context threaded through a run.
//!
//! Nothing here performs IO. Orchestration lives in `shelflife-infra`.

pub mod compose;
pub mod context;
pub mod error;
pub mod ports;
pub mod report;

pub use compose::{AlertComposer, Notification};
pub use context::{RunContext, TriggerSource};
pub use error::{StoreError, SystemError, TransportError, TransportFailure, ValidationError};
pub use ports::{InventoryStore, Transport};
pub use report::{ExecutionReport, RunStatus};
