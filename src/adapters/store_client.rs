//! [`StoreApi`] over the backend's REST endpoints.

use async_trait::async_trait;
use tracing::debug;

use super::rest_client::{ApiRequest, RestClient};
use crate::checkout::IdempotencyKey;
use crate::config::ApiConfig;
use crate::domain::{CreateOrderRequest, CreateOrderResponse, OrderDetails, Product};
use crate::error::Result;
use crate::store::StoreApi;

pub const PRODUCTS_PATH: &str = "/products";
pub const ORDERS_PATH: &str = "/orders";
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

pub fn order_path(order_id: i64) -> String {
    format!("{ORDERS_PATH}/{order_id}")
}

#[derive(Clone)]
pub struct HttpStoreClient {
    rest: RestClient,
}

impl HttpStoreClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(RestClient::from_config(config)?))
    }

    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }
}

#[async_trait]
impl StoreApi for HttpStoreClient {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let products: Option<Vec<Product>> = self.rest.send(ApiRequest::get(PRODUCTS_PATH)).await?;
        let products = products.unwrap_or_default();
        debug!("loaded {} products", products.len());
        Ok(products)
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
        key: &IdempotencyKey,
    ) -> Result<CreateOrderResponse> {
        debug!(
            product_id = request.product_id,
            quantity = request.quantity,
            idempotency_key = %key,
            "submitting order"
        );
        let req = ApiRequest::post(ORDERS_PATH)
            .json(request)?
            .header(IDEMPOTENCY_KEY_HEADER, key.as_str())?;
        self.rest.send(req).await
    }

    async fn get_order(&self, order_id: i64) -> Result<OrderDetails> {
        self.rest.send(ApiRequest::get(order_path(order_id))).await
    }
}
