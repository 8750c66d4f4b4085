//! Client-related types shared between server and client
//!
//! Request/response shapes of the backend's storefront API. The backend
//! answers flat `success` envelopes rather than a generic wrapper, so each
//! endpoint gets its own response type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{MenuItem, Order, OrderItem};

// =============================================================================
// Table Session API DTOs
// =============================================================================

/// Response of `GET /api/table-session/validate/{token}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSessionResponse {
    pub success: bool,
    #[serde(default)]
    pub valid: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub table_number: Option<i64>,
    pub message: Option<String>,
}

// =============================================================================
// Menu API DTOs
// =============================================================================

/// Response of `GET /api/menu/public`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub success: bool,
    #[serde(default)]
    pub menus: Vec<MenuItem>,
    pub message: Option<String>,
}

// =============================================================================
// Order API DTOs
// =============================================================================

/// Request body of `POST /api/order/place`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub session_token: String,
    pub items: Vec<OrderItem>,
}

/// Response of `POST /api/order/place`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order: Option<Order>,
    pub message: Option<String>,
}

/// Response of `GET /api/orders/table/{tableNumber}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOrdersResponse {
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<Order>,
    pub message: Option<String>,
}
