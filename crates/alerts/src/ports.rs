//! Collaborator ports consumed by the expiry-alert subsystem.
//!
//! This crate stays storage/transport agnostic: implementations are provided
//! by callers (infra, tests).

use async_trait::async_trait;
use chrono::NaiveDate;

use shelflife_core::OwnerId;
use shelflife_inventory::{InventoryItem, Owner};

use crate::error::{StoreError, TransportFailure};

/// Read access to owners and their items.
#[async_trait]
pub trait InventoryStore: Send + Sync + 'static {
    /// All owners, in storage order.
    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError>;

    /// Items of `owner_id` whose expiry date lies in `[start, end]` (inclusive),
    /// in storage order.
    async fn find_items_for_owner_in_range(
        &self,
        owner_id: OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<InventoryItem>, StoreError>;

    async fn count_owners(&self) -> Result<usize, StoreError>;

    async fn count_items(&self) -> Result<usize, StoreError>;
}

/// Message delivery capability.
///
/// Retry policy, if any, belongs to the implementation.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<(), TransportFailure>;
}
