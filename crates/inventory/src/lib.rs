//! Inventory domain module.
//!
//! Owners, perishable items and the alert window rule. Pure data and
//! deterministic logic only (no IO, no HTTP, no storage).

pub mod item;
pub mod owner;
pub mod window;

pub use item::{InventoryItem, NewInventoryItem};
pub use owner::Owner;
pub use window::{AlertWindow, WINDOW_DAYS};
