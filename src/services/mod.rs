// Service exports
pub mod seed;
pub mod store;

pub use seed::demo_store;
pub use store::{InventoryStore, StoreError};
