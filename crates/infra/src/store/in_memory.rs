use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use shelflife_alerts::{InventoryStore, StoreError};
use shelflife_core::{DomainError, InventoryItemId, OwnerId};
use shelflife_inventory::{InventoryItem, NewInventoryItem, Owner};

#[derive(Debug, Default)]
struct State {
    owners: Vec<Owner>,
    items: Vec<InventoryItem>,
}

/// In-memory inventory store for tests/dev.
///
/// Preserves insertion order for both owners and items and enforces
/// batch-number uniqueness across all owners. Can be flipped into an
/// "unavailable" mode to exercise systemic failure paths.
#[derive(Debug)]
pub struct InMemoryInventoryStore {
    inner: RwLock<State>,
    available: AtomicBool,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State::default()),
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn add_owner(&self, owner: Owner) -> Result<(), DomainError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("inventory store lock poisoned"))?;

        if state.owners.iter().any(|o| o.id_typed() == owner.id_typed()) {
            return Err(DomainError::conflict(format!(
                "owner {} already exists",
                owner.id_typed()
            )));
        }
        state.owners.push(owner);
        Ok(())
    }

    pub fn add_item(&self, new: NewInventoryItem) -> Result<InventoryItem, DomainError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("inventory store lock poisoned"))?;

        if !state.owners.iter().any(|o| o.id_typed() == new.owner_id) {
            return Err(DomainError::not_found());
        }
        if state
            .items
            .iter()
            .any(|i| i.batch_number() == new.batch_number)
        {
            return Err(DomainError::conflict(format!(
                "batch number '{}' already exists",
                new.batch_number
            )));
        }

        let item = InventoryItem::create(InventoryItemId::new(), new)?;
        state.items.push(item.clone());
        Ok(item)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, StoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store marked unavailable".to_string()));
        }
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("inventory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryInventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list_owners(&self) -> Result<Vec<Owner>, StoreError> {
        Ok(self.read()?.owners.clone())
    }

    async fn find_items_for_owner_in_range(
        &self,
        owner_id: OwnerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let state = self.read()?;
        Ok(state
            .items
            .iter()
            .filter(|i| i.owner_id() == owner_id)
            .filter(|i| start <= i.expiry_date() && i.expiry_date() <= end)
            .cloned()
            .collect())
    }

    async fn count_owners(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.owners.len())
    }

    async fn count_items(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn new_item(owner_id: OwnerId, batch: &str, day: u32) -> NewInventoryItem {
        NewInventoryItem {
            owner_id,
            name: format!("item {batch}"),
            quantity: 1,
            batch_number: batch.to_string(),
            expiry_date: date(day),
            manufacturer: None,
        }
    }

    fn store_with_owner() -> (InMemoryInventoryStore, OwnerId) {
        let store = InMemoryInventoryStore::new();
        let owner_id = OwnerId::new();
        store
            .add_owner(Owner::new(owner_id, "Ada", "ada@example.com").unwrap())
            .unwrap();
        (store, owner_id)
    }

    #[test]
    fn batch_numbers_are_unique_across_owners() {
        let (store, a) = store_with_owner();
        let b = OwnerId::new();
        store
            .add_owner(Owner::new(b, "Bob", "bob@example.com").unwrap())
            .unwrap();

        store.add_item(new_item(a, "B-1", 3)).unwrap();
        let err = store.add_item(new_item(b, "B-1", 4)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn items_require_existing_owner() {
        let store = InMemoryInventoryStore::new();
        let err = store.add_item(new_item(OwnerId::new(), "B-1", 3)).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn duplicate_owner_rejected() {
        let (store, a) = store_with_owner();
        let err = store
            .add_owner(Owner::new(a, "Ada again", "ada2@example.com").unwrap())
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn range_query_is_inclusive_owner_scoped_and_ordered() {
        let (store, a) = store_with_owner();
        let b = OwnerId::new();
        store
            .add_owner(Owner::new(b, "Bob", "bob@example.com").unwrap())
            .unwrap();

        store.add_item(new_item(a, "late", 9)).unwrap();
        store.add_item(new_item(a, "first", 1)).unwrap();
        store.add_item(new_item(a, "outside", 10)).unwrap();
        store.add_item(new_item(b, "other-owner", 5)).unwrap();

        let items = store
            .find_items_for_owner_in_range(a, date(1), date(9))
            .await
            .unwrap();
        let batches: Vec<_> = items.iter().map(|i| i.batch_number()).collect();
        assert_eq!(batches, vec!["late", "first"]);
    }

    #[tokio::test]
    async fn unavailable_store_fails_reads() {
        let (store, _) = store_with_owner();
        store.set_available(false);
        assert!(matches!(
            store.list_owners().await,
            Err(StoreError::Unavailable(_))
        ));
        store.set_available(true);
        assert_eq!(store.count_owners().await.unwrap(), 1);
    }
}
