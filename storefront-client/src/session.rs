//! Table session and cart state
//!
//! `SessionManager` owns exactly one (token, table) pair and the cart bound
//! to it. Every cart mutation is guarded by session validity and persisted
//! under a key scoped by the session token, so resuming a session restores
//! its cart and switching sessions never leaks another table's cart.

use tracing::{debug, info, warn};

use crate::http::StorefrontApi;
use crate::orders::{OrderTracker, PlaceOrderOutcome};
use crate::store::TableStore;
use shared::models::{CartLine, MenuItem, OrderItem, TableSession};

/// Result of a guarded cart action, surfaced to the UI as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Session/cart state container
///
/// Generic over the backend seam so tests can drive it with a stub.
pub struct SessionManager<A> {
    api: A,
    store: TableStore,
    session: Option<TableSession>,
    session_valid: bool,
    cart: Vec<CartLine>,
}

impl<A: StorefrontApi> SessionManager<A> {
    pub fn new(api: A, store: TableStore) -> Self {
        Self {
            api,
            store,
            session: None,
            session_valid: false,
            cart: Vec::new(),
        }
    }

    // ========== Session lifecycle ==========

    /// Validate a scanned (token, table) pair and adopt it as the active
    /// session
    ///
    /// On success the session fields are persisted and any cart previously
    /// saved under this token is restored. Safe to call repeatedly with the
    /// same token. On failure the session is marked invalid and nothing
    /// else is touched, so a previously persisted session survives a
    /// transient network error until it is re-validated.
    pub async fn initialize_session(&mut self, token: &str, table_number: i64) -> bool {
        match self.api.validate_session(token).await {
            Ok(response) if response.success && response.valid => {
                let mut session = TableSession::new(token, table_number);
                session.expires_at = response.expires_at;

                if let Err(err) = self.store.save_session(&session) {
                    warn!(error = %err, "Failed to persist session");
                }
                self.cart = self.store.load_cart(token).unwrap_or_else(|err| {
                    warn!(error = %err, "Failed to load persisted cart");
                    Vec::new()
                });
                self.session = Some(session);
                self.session_valid = true;

                info!(table = table_number, "Session initialized");
                true
            }
            Ok(response) => {
                debug!(message = ?response.message, "Session rejected by backend");
                self.session_valid = false;
                false
            }
            Err(err) => {
                warn!(error = %err, "Session validation failed");
                self.session_valid = false;
                false
            }
        }
    }

    /// Re-check an existing token without changing the table binding
    pub async fn validate_session(&mut self, token: &str) -> bool {
        match self.api.validate_session(token).await {
            Ok(response) if response.success && response.valid => {
                if let Some(session) = self.session.as_mut().filter(|s| s.token == token) {
                    session.expires_at = response.expires_at;
                    self.session_valid = true;
                }
                true
            }
            Ok(_) => {
                if self.session.as_ref().is_some_and(|s| s.token == token) {
                    self.session_valid = false;
                }
                false
            }
            Err(err) => {
                warn!(error = %err, "Session validation failed");
                if self.session.as_ref().is_some_and(|s| s.token == token) {
                    self.session_valid = false;
                }
                false
            }
        }
    }

    /// Resume a previously persisted session after a restart
    ///
    /// Loads the stored session, re-validates its token against the
    /// backend, and restores the cart. A stale or rejected session is
    /// cleared entirely.
    pub async fn resume(&mut self) -> bool {
        let stored = match self.store.load_session() {
            Ok(Some(session)) => session,
            Ok(None) => return false,
            Err(err) => {
                warn!(error = %err, "Failed to load persisted session");
                return false;
            }
        };

        if stored.is_expired() {
            info!("Persisted session expired, clearing");
            self.session = Some(stored);
            self.clear_session();
            return false;
        }

        let token = stored.token.clone();
        let table_number = stored.table_number;
        self.session = Some(stored);

        if self.validate_session(&token).await {
            self.cart = self.store.load_cart(&token).unwrap_or_default();
            info!(table = table_number, "Session resumed");
            true
        } else {
            self.clear_session();
            false
        }
    }

    /// Wipe the session, its persisted fields, and the cart tied to its
    /// token
    pub fn clear_session(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(err) = self.store.remove_cart(&session.token) {
                warn!(error = %err, "Failed to remove persisted cart");
            }
        }
        if let Err(err) = self.store.clear_session() {
            warn!(error = %err, "Failed to clear persisted session");
        }
        self.session_valid = false;
        self.cart.clear();
    }

    /// Whether the session passed its last validation and has not expired
    pub fn session_valid(&self) -> bool {
        self.session_valid && self.session.as_ref().is_some_and(|s| !s.is_expired())
    }

    pub fn session(&self) -> Option<&TableSession> {
        self.session.as_ref()
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn table_number(&self) -> Option<i64> {
        self.session.as_ref().map(|s| s.table_number)
    }

    // ========== Cart ==========

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// Add one unit of a menu item to the cart
    ///
    /// The guard runs before any mutation: without a valid session the cart
    /// stays untouched and the caller gets a user-facing message.
    pub fn add_to_cart(&mut self, item: &MenuItem) -> ActionResult {
        if !self.session_valid() {
            return ActionResult::fail("Please scan the QR code at your table to order");
        }

        match self.cart.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.cart.push(CartLine::from_item(item)),
        }
        self.persist_cart();

        ActionResult::ok("Added to cart")
    }

    /// Remove a line unconditionally; absent id is a no-op
    pub fn remove_from_cart(&mut self, item_id: &str) {
        let before = self.cart.len();
        self.cart.retain(|line| line.item_id != item_id);
        if self.cart.len() != before {
            self.persist_cart();
        }
    }

    /// Add `delta` to a line's quantity; a result of zero or less removes
    /// the line
    pub fn update_quantity(&mut self, item_id: &str, delta: i64) {
        let Some(index) = self.cart.iter().position(|line| line.item_id == item_id) else {
            return;
        };

        let quantity = self.cart[index].quantity + delta;
        if quantity > 0 {
            self.cart[index].quantity = quantity;
        } else {
            self.cart.remove(index);
        }
        self.persist_cart();
    }

    /// Empty the cart and drop its persisted copy
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        if let Some(token) = self.session_token() {
            let token = token.to_string();
            if let Err(err) = self.store.remove_cart(&token) {
                warn!(error = %err, "Failed to remove persisted cart");
            }
        }
    }

    /// Sum of `price * quantity` over all lines
    pub fn total_price(&self) -> f64 {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines
    pub fn total_items(&self) -> i64 {
        self.cart.iter().map(|line| line.quantity).sum()
    }

    // ========== Checkout ==========

    /// Place the cart as an order
    ///
    /// Guarded by session validity and a non-empty cart. The confirmed
    /// order is handed to the tracker (dedup by id) and the cart is cleared
    /// only on success, so a failed attempt can simply be retried.
    pub async fn place_order(&mut self, tracker: &mut OrderTracker<A>) -> PlaceOrderOutcome {
        if !self.session_valid() {
            return PlaceOrderOutcome::fail("Invalid session");
        }
        if self.cart.is_empty() {
            return PlaceOrderOutcome::fail("Cart is empty");
        }

        let items: Vec<OrderItem> = self
            .cart
            .iter()
            .map(|line| OrderItem {
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect();

        let outcome = tracker.place_order(&items).await;
        if outcome.success {
            self.clear_cart();
        }
        outcome
    }

    fn persist_cart(&self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let result = if self.cart.is_empty() {
            self.store.remove_cart(&session.token)
        } else {
            self.store.save_cart(&session.token, &self.cart)
        };
        if let Err(err) = result {
            warn!(error = %err, "Failed to persist cart");
        }
    }
}
