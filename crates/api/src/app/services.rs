use std::sync::Arc;

use shelflife_alerts::{AlertComposer, InventoryStore, Transport};
use shelflife_core::DomainError;
use shelflife_infra::clock::{Clock, SystemClock};
use shelflife_infra::expiry::{ExpiryCheckRunner, ExpiryQuery, NotificationDispatcher};
use shelflife_infra::store::{seed_demo_data, InMemoryInventoryStore};
use shelflife_infra::transport::{LogTransport, TransportProbe};
use shelflife_infra::triggers::ManualTrigger;
use shelflife_infra::AppConfig;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppServices {
    store: Arc<dyn InventoryStore>,
    runner: Arc<ExpiryCheckRunner>,
    manual: ManualTrigger,
    probe: TransportProbe,
    clock: Arc<dyn Clock>,
}

impl AppServices {
    /// Wire the runner and both HTTP-facing adapters around the given
    /// collaborators.
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn InventoryStore>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let runner = Arc::new(ExpiryCheckRunner::new(
            ExpiryQuery::new(store.clone(), config.store_timeout()),
            AlertComposer::new(config.signature.clone()),
            NotificationDispatcher::new(transport.clone(), config.transport_timeout()),
        ));
        let manual = ManualTrigger::new(runner.clone(), clock.clone());
        let probe = TransportProbe::new(transport, config.transport_timeout());

        Self {
            store,
            runner,
            manual,
            probe,
            clock,
        }
    }

    pub fn store(&self) -> &Arc<dyn InventoryStore> {
        &self.store
    }

    /// Shared with the recurring trigger so both go through one single-flight guard.
    pub fn runner(&self) -> &Arc<ExpiryCheckRunner> {
        &self.runner
    }

    pub fn manual(&self) -> &ManualTrigger {
        &self.manual
    }

    pub fn probe(&self) -> &TransportProbe {
        &self.probe
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}

/// Process wiring: in-memory store (optionally seeded), log transport, system clock.
pub fn build_services(config: &AppConfig) -> Result<AppServices, DomainError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Arc::new(InMemoryInventoryStore::new());

    if config.seed_demo_data {
        seed_demo_data(&store, clock.today())?;
    }

    Ok(AppServices::new(config, store, Arc::new(LogTransport), clock))
}
