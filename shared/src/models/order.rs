//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status
///
/// Happy path is `pending -> preparing -> served`; `served` is terminal.
/// Cancellation removes the order entirely rather than adding a status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Served,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::Served => write!(f, "served"),
        }
    }
}

/// Order line as submitted to and echoed back by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    /// Unit price in currency unit
    pub price: f64,
    pub quantity: i64,
}

/// Order entity (server-assigned id, client never mutates business fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order reference (String ID, assigned by the server)
    #[serde(alias = "_id")]
    pub id: String,
    pub table_number: i64,
    pub items: Vec<OrderItem>,
    /// Total amount in currency unit
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate statistics over an order list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub preparing: usize,
    pub served: usize,
    /// Sum of order totals in currency unit
    pub total_amount: f64,
}
