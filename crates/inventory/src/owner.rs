use serde::{Deserialize, Serialize};

use shelflife_core::{DomainError, DomainResult, OwnerId};

/// An account that holds an inventory and receives expiry alerts.
///
/// Read-only from the point of view of the alert subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    id: OwnerId,
    display_name: String,
    contact_address: String,
}

impl Owner {
    pub fn new(
        id: OwnerId,
        display_name: impl Into<String>,
        contact_address: impl Into<String>,
    ) -> DomainResult<Self> {
        let display_name = display_name.into();
        let contact_address = contact_address.into();

        if display_name.trim().is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }
        if contact_address.trim().is_empty() {
            return Err(DomainError::validation("contact address cannot be empty"));
        }

        Ok(Self {
            id,
            display_name,
            contact_address,
        })
    }

    pub fn id_typed(&self) -> OwnerId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn contact_address(&self) -> &str {
        &self.contact_address
    }
}
