//! Real-time channel events
//!
//! The channel delivers `(event name, JSON payload)` pairs per subscribed
//! table. Payloads arrive untyped; this module turns them into tagged
//! variants so consumers pattern-match instead of trusting object shapes.
//! Unknown event names and malformed payloads decode to `None` - delivery
//! problems are no-ops, never errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderStatus};

/// Event names as they appear on the wire
pub const EVENT_NEW_ORDER: &str = "newOrder";
pub const EVENT_ORDER_STATUS_UPDATED: &str = "orderStatusUpdated";
pub const EVENT_ORDER_CANCELLED: &str = "orderCancelled";
pub const EVENT_MENU_REFRESH: &str = "menu:refresh";
pub const EVENT_MENU_APPROVED: &str = "menu:approved";

/// Payload of an `orderStatusUpdated` event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(alias = "_id")]
    pub id: String,
    pub table_number: i64,
    pub status: OrderStatus,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload of an `orderCancelled` event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    #[serde(alias = "_id")]
    pub id: String,
    pub table_number: i64,
}

/// A decoded real-time event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableEvent {
    /// Full order confirmed by the server (idempotent insert)
    NewOrder(Order),
    /// Status transition for a known order (idempotent field overwrite)
    StatusUpdated(StatusUpdate),
    /// Order removed server-side (idempotent removal)
    Cancelled(Cancellation),
    /// Public menu changed; the menu listing should re-fetch
    MenuRefresh,
}

impl TableEvent {
    /// Decode a named wire event
    ///
    /// Returns `None` for unknown names and for payloads that do not match
    /// the expected shape.
    pub fn decode(name: &str, payload: &serde_json::Value) -> Option<Self> {
        let event = match name {
            EVENT_NEW_ORDER => TableEvent::NewOrder(Self::decode_payload(name, payload)?),
            EVENT_ORDER_STATUS_UPDATED => {
                TableEvent::StatusUpdated(Self::decode_payload(name, payload)?)
            }
            EVENT_ORDER_CANCELLED => TableEvent::Cancelled(Self::decode_payload(name, payload)?),
            EVENT_MENU_REFRESH | EVENT_MENU_APPROVED => TableEvent::MenuRefresh,
            _ => {
                tracing::debug!(event = %name, "Ignoring unknown event");
                return None;
            }
        };
        Some(event)
    }

    fn decode_payload<T: serde::de::DeserializeOwned>(
        name: &str,
        payload: &serde_json::Value,
    ) -> Option<T> {
        match serde_json::from_value(payload.clone()) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::debug!(event = %name, error = %err, "Ignoring malformed event payload");
                None
            }
        }
    }

    /// Table this event is addressed to, when the payload carries one
    pub fn table_number(&self) -> Option<i64> {
        match self {
            TableEvent::NewOrder(order) => Some(order.table_number),
            TableEvent::StatusUpdated(update) => Some(update.table_number),
            TableEvent::Cancelled(cancellation) => Some(cancellation.table_number),
            TableEvent::MenuRefresh => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_new_order() {
        let payload = json!({
            "_id": "o1",
            "tableNumber": 5,
            "items": [{"name": "Burger", "price": 9.5, "quantity": 2}],
            "totalAmount": 19.0,
            "status": "pending",
            "createdAt": "2026-01-10T12:00:00Z",
            "updatedAt": null,
        });

        let event = TableEvent::decode(EVENT_NEW_ORDER, &payload).unwrap();
        match event {
            TableEvent::NewOrder(order) => {
                assert_eq!(order.id, "o1");
                assert_eq!(order.table_number, 5);
                assert_eq!(order.status, OrderStatus::Pending);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_status_update() {
        let payload = json!({
            "id": "o1",
            "tableNumber": 5,
            "status": "preparing",
            "updatedAt": "2026-01-10T12:05:00Z",
        });

        let event = TableEvent::decode(EVENT_ORDER_STATUS_UPDATED, &payload).unwrap();
        match event {
            TableEvent::StatusUpdated(update) => {
                assert_eq!(update.id, "o1");
                assert_eq!(update.status, OrderStatus::Preparing);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_decode_menu_events() {
        assert!(matches!(
            TableEvent::decode(EVENT_MENU_REFRESH, &serde_json::Value::Null),
            Some(TableEvent::MenuRefresh)
        ));
        assert!(matches!(
            TableEvent::decode(EVENT_MENU_APPROVED, &serde_json::Value::Null),
            Some(TableEvent::MenuRefresh)
        ));
    }

    #[test]
    fn test_unknown_event_is_none() {
        assert!(TableEvent::decode("somethingElse", &serde_json::Value::Null).is_none());
    }

    #[test]
    fn test_malformed_payload_is_none() {
        let payload = json!({"id": 42});
        assert!(TableEvent::decode(EVENT_ORDER_CANCELLED, &payload).is_none());
    }
}
