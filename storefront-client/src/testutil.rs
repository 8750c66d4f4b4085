//! Shared test fixtures: a stub backend and sample domain objects

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ClientError, ClientResult};
use crate::http::StorefrontApi;
use shared::client::{PlaceOrderRequest, PlaceOrderResponse, ValidateSessionResponse};
use shared::models::{MenuItem, Order, OrderItem, OrderStatus};

/// Scripted backend used to drive the managers in isolation
pub struct StubApi {
    /// What the validation endpoint answers for `valid`
    pub valid: bool,
    pub expires_at: Option<DateTime<Utc>>,
    /// Simulate a transport failure on validation
    pub network_down: bool,
    /// Server rejection message for place-order attempts
    pub place_failure: Option<String>,
    /// What the orders-for-table endpoint answers
    pub server_orders: Mutex<Vec<Order>>,
    pub order_counter: AtomicU64,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            valid: true,
            expires_at: None,
            network_down: false,
            place_failure: None,
            server_orders: Mutex::new(Vec::new()),
            order_counter: AtomicU64::new(0),
        }
    }
}

impl StubApi {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            network_down: true,
            ..Self::default()
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            place_failure: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl StorefrontApi for StubApi {
    async fn validate_session(&self, _token: &str) -> ClientResult<ValidateSessionResponse> {
        if self.network_down {
            return Err(ClientError::Internal("connection refused".to_string()));
        }
        Ok(ValidateSessionResponse {
            success: true,
            valid: self.valid,
            expires_at: self.expires_at,
            table_number: None,
            message: (!self.valid).then(|| "Session expired".to_string()),
        })
    }

    async fn fetch_menu(&self) -> ClientResult<Vec<MenuItem>> {
        Ok(Vec::new())
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<PlaceOrderResponse> {
        if let Some(message) = &self.place_failure {
            return Err(ClientError::Api(message.clone()));
        }

        let n = self.order_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let order = Order {
            id: format!("order-{n}"),
            table_number: 5,
            items: request.items.clone(),
            total_amount: request
                .items
                .iter()
                .map(|item| item.price * item.quantity as f64)
                .sum(),
            status: OrderStatus::Pending,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        Ok(PlaceOrderResponse {
            success: true,
            order: Some(order),
            message: None,
        })
    }

    async fn table_orders(&self, _table_number: i64) -> ClientResult<Vec<Order>> {
        if self.network_down {
            return Err(ClientError::Internal("connection refused".to_string()));
        }
        Ok(self.server_orders.lock().unwrap().clone())
    }
}

pub fn sample_item(id: &str, name: &str, price: f64) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        price,
        image: Vec::new(),
        bestseller: false,
    }
}

pub fn sample_order(id: &str, table_number: i64, total_amount: f64) -> Order {
    Order {
        id: id.to_string(),
        table_number,
        items: vec![OrderItem {
            name: "Burger".to_string(),
            price: total_amount,
            quantity: 1,
        }],
        total_amount,
        status: OrderStatus::Pending,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}
