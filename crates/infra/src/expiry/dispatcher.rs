use std::sync::Arc;
use std::time::Duration;

use shelflife_alerts::{Notification, Transport, TransportError};
use shelflife_inventory::Owner;

/// Proof that a notification was accepted by the transport.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sent;

/// Sends one composed notification to one owner.
///
/// No retries. A failed or timed-out send comes back as a [`TransportError`]
/// value carrying the owner's identity; it is never raised past the caller.
pub struct NotificationDispatcher {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub async fn dispatch(
        &self,
        owner: &Owner,
        notification: &Notification,
    ) -> Result<Sent, TransportError> {
        let address = owner.contact_address();
        let send = self
            .transport
            .send(address, &notification.subject, &notification.body);

        let cause = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(())) => return Ok(Sent),
            Ok(Err(failure)) => failure.to_string(),
            Err(_) => format!("send timed out after {}ms", self.timeout.as_millis()),
        };

        Err(TransportError {
            owner_id: owner.id_typed(),
            address: address.to_string(),
            cause,
        })
    }
}
