//! Message transport adapters.
//!
//! Real delivery (SMTP, SMS, ...) plugs in behind
//! [`shelflife_alerts::Transport`]; the adapters here cover development and
//! tests.

pub mod in_memory;
pub mod log;
pub mod probe;

pub use in_memory::{InMemoryTransport, SentMessage};
pub use log::LogTransport;
pub use probe::{ProbeError, TransportProbe};
