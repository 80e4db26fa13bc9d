//! SQLite adapters - persistence for settings, users, servers, and ports.
//!
//! The schema is ensured at startup with `CREATE TABLE IF NOT EXISTS`
//! statements; there is no separate migration pipeline for this
//! single-file database.

mod pool;
mod port_inventory;
mod server_registry;
mod settings_store;
mod user_repository;

pub use pool::{connect, ensure_schema};
pub use port_inventory::SqlitePortInventory;
pub use server_registry::SqliteServerRegistry;
pub use settings_store::SqliteSettingsStore;
pub use user_repository::SqliteUserRepository;
