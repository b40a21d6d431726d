use serde::Serialize;
use thiserror::Error;

use shelflife_core::OwnerId;

/// Failure reported by an [`InventoryStore`](crate::ports::InventoryStore) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),
}

/// Failure reported by a [`Transport`](crate::ports::Transport) implementation.
///
/// Carries only the transport's own cause; owner context is attached by the
/// dispatcher (see [`TransportError`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportFailure(pub String);

impl TransportFailure {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

/// One owner's notification could not be delivered.
///
/// Recovered locally: logged, counted, and the run continues.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("failed to notify owner {owner_id} at {address}: {cause}")]
pub struct TransportError {
    pub owner_id: OwnerId,
    pub address: String,
    pub cause: String,
}

/// Systemic failure: fatal to the current run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SystemError {
    #[error("owner enumeration failed: {0}")]
    OwnerEnumeration(StoreError),

    #[error("inventory query failed for owner {owner_id}: {source}")]
    Query {
        owner_id: OwnerId,
        #[source]
        source: StoreError,
    },

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },
}

/// Malformed trigger input. Surfaced to the caller; no run is started.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl ValidationError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
