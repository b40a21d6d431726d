//! Entry points that start expiry-check runs.
//!
//! Both adapters are thin: they pick the reference date, build a
//! [`RunContext`](shelflife_alerts::RunContext), and delegate to the one
//! [`ExpiryCheckRunner`](crate::expiry::ExpiryCheckRunner). They differ only
//! in what happens to the outcome (logged vs returned).

pub mod manual;
pub mod recurring;

pub use manual::{ManualTrigger, ManualTriggerError, ManualTriggerRequest};
pub use recurring::{RecurringTrigger, RecurringTriggerHandle};
