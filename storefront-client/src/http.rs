//! HTTP client for network-based API calls
//!
//! `StorefrontApi` is the seam between the state containers and the
//! backend; `HttpClient` is its reqwest implementation. Tests drive the
//! managers through stub implementations of the trait instead.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::client::{
    MenuResponse, PlaceOrderRequest, PlaceOrderResponse, TableOrdersResponse,
    ValidateSessionResponse,
};
use shared::models::{MenuItem, Order};

/// Backend operations the state layer depends on
#[async_trait]
pub trait StorefrontApi {
    /// Check a session token against the backend
    async fn validate_session(&self, token: &str) -> ClientResult<ValidateSessionResponse>;

    /// Fetch the public menu
    async fn fetch_menu(&self) -> ClientResult<Vec<MenuItem>>;

    /// Submit an order for the session's table
    async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<PlaceOrderResponse>;

    /// Fetch all orders recorded for a table
    async fn table_orders(&self, table_number: i64) -> ClientResult<Vec<Order>>;
}

/// HTTP client for making network requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

/// Error envelope the backend answers with on non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            // Error bodies carry a user-facing message when the backend
            // rejected the request deliberately
            if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
                if let Some(message) = body.message {
                    return Err(ClientError::Api(message));
                }
            }
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl StorefrontApi for HttpClient {
    async fn validate_session(&self, token: &str) -> ClientResult<ValidateSessionResponse> {
        self.get(&format!("api/table-session/validate/{token}")).await
    }

    async fn fetch_menu(&self) -> ClientResult<Vec<MenuItem>> {
        let response: MenuResponse = self.get("api/menu/public").await?;
        if !response.success {
            return Err(ClientError::Api(
                response
                    .message
                    .unwrap_or_else(|| "Failed to load menu items".to_string()),
            ));
        }
        Ok(response.menus)
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<PlaceOrderResponse> {
        self.post("api/order/place", request).await
    }

    async fn table_orders(&self, table_number: i64) -> ClientResult<Vec<Order>> {
        let response: TableOrdersResponse =
            self.get(&format!("api/orders/table/{table_number}")).await?;
        if !response.success {
            return Err(ClientError::Api(
                response
                    .message
                    .unwrap_or_else(|| "Failed to load orders".to_string()),
            ));
        }
        Ok(response.orders)
    }
}
