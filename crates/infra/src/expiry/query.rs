use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use shelflife_alerts::{InventoryStore, SystemError};
use shelflife_core::OwnerId;
use shelflife_inventory::{AlertWindow, InventoryItem, Owner};

use super::bounded;

/// Read side of a run: owner enumeration and per-owner expiry selection.
///
/// Side-effect free. Every store call is bounded by `timeout`.
pub struct ExpiryQuery {
    store: Arc<dyn InventoryStore>,
    timeout: Duration,
}

impl ExpiryQuery {
    pub fn new(store: Arc<dyn InventoryStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn list_owners(&self) -> Result<Vec<Owner>, SystemError> {
        bounded("list_owners", self.timeout, self.store.list_owners())
            .await?
            .map_err(SystemError::OwnerEnumeration)
    }

    /// Items of `owner_id` expiring within `[as_of, as_of + 7]`, in store order.
    pub async fn select_expiring(
        &self,
        owner_id: OwnerId,
        as_of: NaiveDate,
    ) -> Result<Vec<InventoryItem>, SystemError> {
        let window = AlertWindow::starting(as_of);

        let items = bounded(
            "find_items_for_owner_in_range",
            self.timeout,
            self.store
                .find_items_for_owner_in_range(owner_id, window.start(), window.end()),
        )
        .await?
        .map_err(|source| SystemError::Query { owner_id, source })?;

        // The store is trusted for order, not for the window rule.
        Ok(items
            .into_iter()
            .filter(|i| i.owner_id() == owner_id && window.contains(i.expiry_date()))
            .collect())
    }
}
