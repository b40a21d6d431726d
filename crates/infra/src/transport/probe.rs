//! Transport smoke test: send a fixed message to an arbitrary address.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use shelflife_alerts::{Notification, Transport, TransportFailure, ValidationError};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("transport failed: {0}")]
    Transport(#[from] TransportFailure),

    #[error("transport timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Sends a canned test message through the configured transport so operators
/// can confirm delivery works before the first scheduled run.
pub struct TransportProbe {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl TransportProbe {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub async fn send_test(&self, address: &str, name: &str) -> Result<(), ProbeError> {
        let address = address.trim();
        let name = name.trim();
        if address.is_empty() {
            return Err(ValidationError::Missing("address").into());
        }
        if name.is_empty() {
            return Err(ValidationError::Missing("name").into());
        }

        let message = test_notification(name);
        let send = self.transport.send(address, &message.subject, &message.body);

        match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(())) => {
                info!(address, "test notification sent");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(address, error = %e, "test notification failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(address, "test notification timed out");
                Err(ProbeError::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
        }
    }
}

pub fn test_notification(name: &str) -> Notification {
    Notification {
        subject: "Test message from Shelflife".to_string(),
        body: format!(
            "Hello {name},\n\n\
             This is a test message from the Shelflife inventory expiry monitor.\n\n\
             If you received it, expiry alerts can reach this address.\n\n\
             Best regards,\nShelflife\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::InMemoryTransport;

    fn probe(t: Arc<InMemoryTransport>) -> TransportProbe {
        TransportProbe::new(t, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_sending() {
        let t = Arc::new(InMemoryTransport::new());
        let err = probe(t.clone()).send_test("  ", "Ada").await.unwrap_err();
        assert!(matches!(err, ProbeError::Validation(ValidationError::Missing("address"))));
        let err = probe(t.clone()).send_test("ada@example.com", "").await.unwrap_err();
        assert!(matches!(err, ProbeError::Validation(ValidationError::Missing("name"))));
        assert!(t.attempts().is_empty());
    }

    #[tokio::test]
    async fn sends_greeting() {
        let t = Arc::new(InMemoryTransport::new());
        probe(t.clone()).send_test("ada@example.com", "Ada").await.unwrap();
        let sent = t.sent_to("ada@example.com");
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.starts_with("Hello Ada,\n\n"));
    }

    #[tokio::test]
    async fn stalled_transport_times_out() {
        let t = Arc::new(InMemoryTransport::new());
        t.stall_for(Duration::from_secs(5));
        let err = probe(t).send_test("ada@example.com", "Ada").await.unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { timeout_ms: 200 }));
    }
}
