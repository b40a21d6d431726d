use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use shelflife_alerts::{Transport, TransportFailure};

/// A message accepted by [`InMemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub address: String,
    pub subject: String,
    pub body: String,
}

/// Recording transport for tests/dev.
///
/// Every send is recorded as an attempt; sends to addresses registered with
/// [`fail_for`](Self::fail_for) are refused, and [`stall_for`](Self::stall_for)
/// delays every send to exercise timeouts.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    sent: Mutex<Vec<SentMessage>>,
    attempts: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    stall: Mutex<Option<Duration>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, address: impl Into<String>) {
        lock(&self.failing).insert(address.into());
    }

    pub fn stall_for(&self, delay: Duration) {
        *lock(&self.stall) = Some(delay);
    }

    /// Successfully delivered messages, in send order.
    pub fn sent(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<SentMessage> {
        lock(&self.sent)
            .iter()
            .filter(|m| m.address == address)
            .cloned()
            .collect()
    }

    /// Addresses of every send attempt (delivered or refused), in order.
    pub fn attempts(&self) -> Vec<String> {
        lock(&self.attempts).clone()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), TransportFailure> {
        lock(&self.attempts).push(address.to_string());

        let stall = *lock(&self.stall);
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }

        if lock(&self.failing).contains(address) {
            return Err(TransportFailure::new(format!("recipient {address} refused")));
        }

        lock(&self.sent).push(SentMessage {
            address: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_and_refuses() {
        let t = InMemoryTransport::new();
        t.fail_for("bad@example.com");

        t.send("ok@example.com", "s", "b").await.unwrap();
        let err = t.send("bad@example.com", "s", "b").await.unwrap_err();

        assert!(err.to_string().contains("bad@example.com"));
        assert_eq!(t.sent().len(), 1);
        assert_eq!(t.sent_to("ok@example.com")[0].subject, "s");
        assert_eq!(t.attempts(), vec!["ok@example.com", "bad@example.com"]);
    }
}
