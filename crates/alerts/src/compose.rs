use serde::{Deserialize, Serialize};

use shelflife_inventory::{InventoryItem, Owner, WINDOW_DAYS};

/// Sentinel printed when an item has no known manufacturer.
pub const UNKNOWN_MANUFACTURER: &str = "N/A";

/// A composed, ready-to-send notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

/// Turns an owner's expiring items into a single notification.
///
/// Pure: no IO, no clock, no randomness. The same owner and items always
/// produce byte-identical output, and item blocks keep the input order.
#[derive(Debug, Clone)]
pub struct AlertComposer {
    signature: String,
}

impl Default for AlertComposer {
    fn default() -> Self {
        Self::new("Inventory Expiry Monitor")
    }
}

impl AlertComposer {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }

    /// Compose one notification for `owner` covering every item in `items`.
    ///
    /// Returns `None` for an empty slice: owners with nothing expiring are
    /// never notified.
    pub fn compose(&self, owner: &Owner, items: &[InventoryItem]) -> Option<Notification> {
        if items.is_empty() {
            return None;
        }

        let name = owner.display_name();
        let mut body = String::new();

        body.push_str(&format!("Dear {name},\n\n"));
        body.push_str(&format!(
            "The following items in your inventory are expiring within the next {WINDOW_DAYS} days:\n\n"
        ));

        for item in items {
            body.push_str(&item_block(item));
        }

        body.push_str("Please take necessary action to manage these items before they expire.\n\n");
        body.push_str(&format!("Best regards,\n{}\n", self.signature));

        Some(Notification {
            subject: format!("Inventory Expiry Alert - {name}"),
            body,
        })
    }
}

fn item_block(item: &InventoryItem) -> String {
    format!(
        "\u{2022} Name: {}\n  Batch Number: {}\n  Quantity: {}\n  Expiry Date: {}\n  Manufacturer: {}\n\n",
        item.name(),
        item.batch_number(),
        item.quantity(),
        item.expiry_date().format("%Y-%m-%d"),
        item.manufacturer().unwrap_or(UNKNOWN_MANUFACTURER),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use shelflife_core::{InventoryItemId, OwnerId};
    use shelflife_inventory::NewInventoryItem;

    fn owner() -> Owner {
        Owner::new(OwnerId::new(), "Grace Hopper", "grace@example.com").unwrap()
    }

    fn item(owner: &Owner, name: &str, batch: &str, manufacturer: Option<&str>) -> InventoryItem {
        InventoryItem::create(
            InventoryItemId::new(),
            NewInventoryItem {
                owner_id: owner.id_typed(),
                name: name.to_string(),
                quantity: 12,
                batch_number: batch.to_string(),
                expiry_date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
                manufacturer: manufacturer.map(str::to_string),
            },
        )
        .unwrap()
    }

    #[test]
    fn empty_items_compose_nothing() {
        assert_eq!(AlertComposer::default().compose(&owner(), &[]), None);
    }

    #[test]
    fn renders_expected_layout() {
        let o = owner();
        let items = vec![item(&o, "Amoxicillin", "AMX-001", Some("Acme Pharma"))];
        let n = AlertComposer::default().compose(&o, &items).unwrap();

        assert_eq!(n.subject, "Inventory Expiry Alert - Grace Hopper");
        assert_eq!(
            n.body,
            "Dear Grace Hopper,\n\n\
             The following items in your inventory are expiring within the next 7 days:\n\n\
             \u{2022} Name: Amoxicillin\n  Batch Number: AMX-001\n  Quantity: 12\n  Expiry Date: 2025-03-09\n  Manufacturer: Acme Pharma\n\n\
             Please take necessary action to manage these items before they expire.\n\n\
             Best regards,\nInventory Expiry Monitor\n"
        );
    }

    #[test]
    fn missing_manufacturer_uses_sentinel() {
        let o = owner();
        let items = vec![item(&o, "Yogurt", "Y-7", None)];
        let n = AlertComposer::default().compose(&o, &items).unwrap();
        assert!(n.body.contains("Manufacturer: N/A\n"));
    }

    #[test]
    fn keeps_input_order() {
        let o = owner();
        let items = vec![item(&o, "Zinc", "Z-1", None), item(&o, "Aspirin", "A-1", None)];
        let n = AlertComposer::default().compose(&o, &items).unwrap();
        let zinc = n.body.find("Name: Zinc").unwrap();
        let aspirin = n.body.find("Name: Aspirin").unwrap();
        assert!(zinc < aspirin);
    }

    #[test]
    fn custom_signature() {
        let o = owner();
        let items = vec![item(&o, "Milk", "M-1", None)];
        let n = AlertComposer::new("Pantry Bot").compose(&o, &items).unwrap();
        assert!(n.body.ends_with("Best regards,\nPantry Bot\n"));
    }

    proptest! {
        #[test]
        fn composition_is_deterministic_and_lists_each_batch_once(batches in proptest::collection::btree_set("[A-Z]{3}-[0-9]{4}", 1..8)) {
            let o = owner();
            let items: Vec<_> = batches.iter().map(|b| item(&o, "Item", b, None)).collect();
            let composer = AlertComposer::default();

            let first = composer.compose(&o, &items).unwrap();
            let second = composer.compose(&o, &items).unwrap();
            prop_assert_eq!(&first, &second);

            for b in &batches {
                let needle = format!("Batch Number: {b}\n");
                prop_assert_eq!(first.body.matches(&needle).count(), 1);
            }
        }
    }
}
