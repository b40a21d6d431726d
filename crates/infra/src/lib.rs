//! Infrastructure layer: stores, transports, configuration, and the
//! orchestration of expiry-check runs.

pub mod clock;
pub mod config;
pub mod expiry;
pub mod store;
pub mod transport;
pub mod triggers;


pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use expiry::{ExpiryCheckRunner, ExpiryQuery, NotificationDispatcher, RunOutcome, Sent};
