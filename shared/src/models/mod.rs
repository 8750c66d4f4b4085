//! Data models
//!
//! Shared between the state layer and the API DTOs. Wire shapes are
//! camelCase JSON (the backend is a camelCase API); monetary amounts are
//! `f64` in currency units.

pub mod cart;
pub mod menu_item;
pub mod order;
pub mod session;

// Re-exports
pub use cart::*;
pub use menu_item::*;
pub use order::*;
pub use session::*;
