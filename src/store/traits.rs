use async_trait::async_trait;

use crate::checkout::IdempotencyKey;
use crate::domain::{CreateOrderRequest, CreateOrderResponse, OrderDetails, Product};
use crate::error::Result;

/// Backend operations the checkout flow depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// `GET /products`
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// `POST /orders` with the given `Idempotency-Key`
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
        key: &IdempotencyKey,
    ) -> Result<CreateOrderResponse>;

    /// `GET /orders/{id}`
    async fn get_order(&self, order_id: i64) -> Result<OrderDetails>;
}
