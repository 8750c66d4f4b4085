//! Order tracking and reconciliation
//!
//! `OrderTracker` holds the authoritative, reconciled order list for the
//! bound table. Both the checkout response and pushed channel events merge
//! into the same list keyed by order id - insert-if-absent, overwrite
//! status fields, remove-if-present - so duplicate deliveries are no-ops
//! and no code path ever replaces the list wholesale.

use tracing::{debug, info, warn};

use crate::http::StorefrontApi;
use crate::store::TableStore;
use shared::client::PlaceOrderRequest;
use shared::events::TableEvent;
use shared::models::{Order, OrderItem, OrderStats, OrderStatus};

/// Result of a checkout attempt, surfaced to the UI as-is
#[derive(Debug, Clone)]
pub struct PlaceOrderOutcome {
    pub success: bool,
    pub message: String,
    pub order: Option<Order>,
}

impl PlaceOrderOutcome {
    pub(crate) fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            order: None,
        }
    }

    fn placed(order: Order) -> Self {
        Self {
            success: true,
            message: "Order placed successfully".to_string(),
            order: Some(order),
        }
    }
}

/// What became of a delivered channel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Event mutated the order list
    Applied,
    /// Duplicate, unknown id, or another table's event - nothing changed
    Ignored,
    /// Menu change notification; the menu listing should re-fetch
    MenuRefresh,
}

/// Order state container for one table
///
/// Generic over the backend seam so tests can drive it with a stub.
pub struct OrderTracker<A> {
    api: A,
    store: TableStore,
    session_token: Option<String>,
    table_number: Option<i64>,
    orders: Vec<Order>,
}

impl<A: StorefrontApi> OrderTracker<A> {
    pub fn new(api: A, store: TableStore) -> Self {
        Self {
            api,
            store,
            session_token: None,
            table_number: None,
            orders: Vec::new(),
        }
    }

    // ========== Session binding ==========

    /// Bind the tracker to a table and load its persisted order history
    pub fn initialize_session(&mut self, token: &str, table_number: i64) {
        self.session_token = Some(token.to_string());
        self.table_number = Some(table_number);
        self.orders = self.store.load_orders(table_number).unwrap_or_else(|err| {
            warn!(error = %err, "Failed to load persisted orders");
            Vec::new()
        });
        debug!(table = table_number, orders = self.orders.len(), "Order tracker bound");
    }

    /// Unbind and drop the table's persisted order history
    pub fn clear_session(&mut self) {
        if let Some(table_number) = self.table_number.take() {
            if let Err(err) = self.store.remove_orders(table_number) {
                warn!(error = %err, "Failed to remove persisted orders");
            }
        }
        self.session_token = None;
        self.orders.clear();
    }

    pub fn table_number(&self) -> Option<i64> {
        self.table_number
    }

    // ========== Order list ==========

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Reload the tracker's view from the local store
    ///
    /// The local store is the source of truth for the in-flow view; use
    /// [`refresh_orders`](Self::refresh_orders) to reconcile against the
    /// backend.
    pub fn fetch_orders(&mut self) {
        let Some(table_number) = self.table_number else {
            return;
        };
        self.orders = self.store.load_orders(table_number).unwrap_or_default();
    }

    /// Reconcile the list against the backend's view of this table
    ///
    /// Server orders merge by id: known ids are overwritten in place,
    /// unknown ids are inserted at the front. The list is never replaced
    /// wholesale, so a concurrent event application cannot be lost.
    pub async fn refresh_orders(&mut self) -> crate::ClientResult<()> {
        let Some(table_number) = self.table_number else {
            return Ok(());
        };

        let fetched = self.api.table_orders(table_number).await?;
        for order in fetched {
            match self.orders.iter_mut().find(|o| o.id == order.id) {
                Some(existing) => *existing = order,
                None => self.orders.insert(0, order),
            }
        }
        self.persist_orders();
        Ok(())
    }

    /// Submit the given lines as an order for the bound table
    pub async fn place_order(&mut self, items: &[OrderItem]) -> PlaceOrderOutcome {
        let Some(token) = self.session_token.clone() else {
            return PlaceOrderOutcome::fail("No active session");
        };
        if items.is_empty() {
            return PlaceOrderOutcome::fail("Cart is empty");
        }

        let request = PlaceOrderRequest {
            session_token: token,
            items: items.to_vec(),
        };

        match self.api.place_order(&request).await {
            Ok(response) if response.success => match response.order {
                Some(order) => {
                    // The channel may confirm the same order; dedup by id
                    if !self.contains(&order.id) {
                        self.orders.insert(0, order.clone());
                        self.persist_orders();
                    }
                    info!(order_id = %order.id, "Order placed");
                    PlaceOrderOutcome::placed(order)
                }
                None => PlaceOrderOutcome::fail("Invalid response: missing order"),
            },
            Ok(response) => PlaceOrderOutcome::fail(
                response
                    .message
                    .unwrap_or_else(|| "Failed to place order".to_string()),
            ),
            Err(err) => {
                warn!(error = %err, "Place order request failed");
                PlaceOrderOutcome::fail(
                    err.server_message().unwrap_or("Failed to place order").to_string(),
                )
            }
        }
    }

    /// Empty the list and its persisted store; irreversible
    pub fn clear_orders(&mut self) {
        self.orders.clear();
        if let Some(table_number) = self.table_number {
            if let Err(err) = self.store.remove_orders(table_number) {
                warn!(error = %err, "Failed to remove persisted orders");
            }
        }
    }

    /// Aggregate statistics over the current list
    pub fn order_stats(&self) -> OrderStats {
        let mut stats = OrderStats {
            total: self.orders.len(),
            ..OrderStats::default()
        };
        for order in &self.orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Preparing => stats.preparing += 1,
                OrderStatus::Served => stats.served += 1,
            }
            stats.total_amount += order.total_amount;
        }
        stats
    }

    // ========== Event reconciliation ==========

    /// Apply one channel event as an idempotent merge
    ///
    /// Events addressed to other tables are ignored. A status update for a
    /// later state that arrives before an earlier one wins (last write
    /// wins, no sequence numbers); an order inserted after its status
    /// update was dropped keeps the inserted status.
    pub fn apply_event(&mut self, event: &TableEvent) -> EventOutcome {
        if matches!(event, TableEvent::MenuRefresh) {
            return EventOutcome::MenuRefresh;
        }

        if event.table_number() != self.table_number {
            return EventOutcome::Ignored;
        }

        match event {
            TableEvent::NewOrder(order) => {
                if self.contains(&order.id) {
                    debug!(order_id = %order.id, "Duplicate order event ignored");
                    return EventOutcome::Ignored;
                }
                self.orders.insert(0, order.clone());
                self.persist_orders();
                EventOutcome::Applied
            }
            TableEvent::StatusUpdated(update) => {
                let Some(order) = self.orders.iter_mut().find(|o| o.id == update.id) else {
                    debug!(order_id = %update.id, "Status update for unknown order ignored");
                    return EventOutcome::Ignored;
                };
                order.status = update.status;
                order.updated_at = update.updated_at;
                self.persist_orders();
                EventOutcome::Applied
            }
            TableEvent::Cancelled(cancellation) => {
                let before = self.orders.len();
                self.orders.retain(|o| o.id != cancellation.id);
                if self.orders.len() == before {
                    return EventOutcome::Ignored;
                }
                self.persist_orders();
                EventOutcome::Applied
            }
            TableEvent::MenuRefresh => EventOutcome::MenuRefresh,
        }
    }

    fn contains(&self, order_id: &str) -> bool {
        self.orders.iter().any(|o| o.id == order_id)
    }

    fn persist_orders(&self) {
        let Some(table_number) = self.table_number else {
            return;
        };
        if let Err(err) = self.store.save_orders(table_number, &self.orders) {
            warn!(error = %err, "Failed to persist orders");
        }
    }
}
