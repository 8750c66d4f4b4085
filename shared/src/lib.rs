//! Shared types for the storefront
//!
//! Common types used across the client crates: domain models, API
//! request/response shapes, and real-time channel events.

pub mod client;
pub mod events;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Event re-exports (for convenient access)
pub use events::TableEvent;
