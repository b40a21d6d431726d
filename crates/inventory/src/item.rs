use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shelflife_core::{DomainError, DomainResult, InventoryItemId, OwnerId};

/// A perishable inventory item.
///
/// Belongs to exactly one owner for its whole lifetime; the alert subsystem
/// only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: InventoryItemId,
    owner_id: OwnerId,
    name: String,
    quantity: u32,
    batch_number: String,
    expiry_date: NaiveDate,
    manufacturer: Option<String>,
}

/// Input for creating an item (what an external CRUD layer hands to the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub owner_id: OwnerId,
    pub name: String,
    pub quantity: u32,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub manufacturer: Option<String>,
}

impl InventoryItem {
    pub fn create(id: InventoryItemId, new: NewInventoryItem) -> DomainResult<Self> {
        if new.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if new.batch_number.trim().is_empty() {
            return Err(DomainError::validation("batch number cannot be empty"));
        }

        // Blank manufacturer is treated as unknown.
        let manufacturer = new.manufacturer.filter(|m| !m.trim().is_empty());

        Ok(Self {
            id,
            owner_id: new.owner_id,
            name: new.name,
            quantity: new.quantity,
            batch_number: new.batch_number,
            expiry_date: new.expiry_date,
            manufacturer,
        })
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn batch_number(&self) -> &str {
        &self.batch_number
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str, batch: &str, manufacturer: Option<&str>) -> NewInventoryItem {
        NewInventoryItem {
            owner_id: OwnerId::new(),
            name: name.to_string(),
            quantity: 10,
            batch_number: batch.to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            manufacturer: manufacturer.map(str::to_string),
        }
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = InventoryItem::create(InventoryItemId::new(), new_item("  ", "B-1", None)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_empty_batch_number() {
        let err = InventoryItem::create(InventoryItemId::new(), new_item("Milk", "", None)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn blank_manufacturer_becomes_unknown() {
        let item = InventoryItem::create(InventoryItemId::new(), new_item("Milk", "B-1", Some(" "))).unwrap();
        assert_eq!(item.manufacturer(), None);
    }

    #[test]
    fn keeps_owner_reference() {
        let new = new_item("Milk", "B-1", Some("Dairy Co"));
        let owner = new.owner_id;
        let item = InventoryItem::create(InventoryItemId::new(), new).unwrap();
        assert_eq!(item.owner_id(), owner);
        assert_eq!(item.manufacturer(), Some("Dairy Co"));
    }
}
