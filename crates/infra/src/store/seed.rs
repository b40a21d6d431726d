//! Demo data for local development.

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use shelflife_core::{DomainError, OwnerId};
use shelflife_inventory::{NewInventoryItem, Owner};

use super::InMemoryInventoryStore;

/// Seed one demo owner with items around the alert window of `today`:
/// two inside it, one just past its end, one already expired.
pub fn seed_demo_data(store: &InMemoryInventoryStore, today: NaiveDate) -> Result<OwnerId, DomainError> {
    let owner_id = OwnerId::new();
    store.add_owner(Owner::new(owner_id, "Demo Owner", "demo@example.com")?)?;

    let plus = |days: u64| {
        today
            .checked_add_days(Days::new(days))
            .ok_or_else(|| DomainError::validation("demo date out of range"))
    };
    let minus = |days: u64| {
        today
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| DomainError::validation("demo date out of range"))
    };

    let items = [
        ("Amoxicillin 500mg", 30, "DEMO-AMX-001", plus(3)?, Some("Acme Pharma")),
        ("Saline Solution", 12, "DEMO-SAL-002", plus(7)?, None),
        ("Vitamin D3", 60, "DEMO-VIT-003", plus(8)?, Some("Sunrise Labs")),
        ("Ibuprofen 200mg", 5, "DEMO-IBU-004", minus(5)?, Some("Acme Pharma")),
    ];

    for (name, quantity, batch, expiry_date, manufacturer) in items {
        let item = store.add_item(NewInventoryItem {
            owner_id,
            name: name.to_string(),
            quantity,
            batch_number: batch.to_string(),
            expiry_date,
            manufacturer: manufacturer.map(str::to_string),
        })?;
        debug!(item_id = %item.id_typed(), batch, "seeded demo item");
    }

    info!(owner_id = %owner_id, items = items.len(), "seeded demo inventory");
    Ok(owner_id)
}
