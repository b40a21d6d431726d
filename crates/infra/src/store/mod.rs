//! Inventory store adapters.

pub mod in_memory;
pub mod seed;

pub use in_memory::InMemoryInventoryStore;
pub use seed::seed_demo_data;
