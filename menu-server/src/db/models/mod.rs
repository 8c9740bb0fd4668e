//! Database Models

// Serde helpers
pub mod serde_thing;

// Menu domain
pub mod menu_item;

// Re-exports
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemId};
