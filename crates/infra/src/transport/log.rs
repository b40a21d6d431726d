use async_trait::async_trait;
use tracing::{debug, info};

use shelflife_alerts::{Transport, TransportFailure};

/// Development transport: writes messages to the log and always succeeds.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogTransport;

#[async_trait]
impl Transport for LogTransport {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), TransportFailure> {
        info!(
            transport = "log",
            address,
            subject,
            body_bytes = body.len(),
            "message delivered"
        );
        debug!(transport = "log", address, body, "message body");
        Ok(())
    }
}
