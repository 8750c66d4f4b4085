//! Storefront Client - table-session-scoped state layer
//!
//! The two state containers behind a table-ordering storefront UI:
//! [`SessionManager`] (session identity + cart) and [`OrderTracker`]
//! (reconciled order list). Both talk to the backend through the
//! [`StorefrontApi`] seam and persist through the [`TableStore`].

pub mod config;
pub mod error;
pub mod http;
pub mod orders;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, StorefrontApi};
pub use orders::{EventOutcome, OrderTracker, PlaceOrderOutcome};
pub use session::{ActionResult, SessionManager};
pub use store::{StoreError, TableStore};

// Re-export shared types for convenience
pub use shared::events::TableEvent;
pub use shared::models::{CartLine, MenuItem, Order, OrderStats, OrderStatus, TableSession};
