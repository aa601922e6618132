//! Order submission state machine.
//!
//! The session owns the product list, the selection, the raw quantity text
//! and the idempotency key for the current logical attempt. Selected product
//! and numeric quantity are always derived from those on read.
//!
//! Key lifecycle:
//! - created on the first submit that passes local checks
//! - kept when the request fails, so a retry sends the same key
//! - dropped on success and whenever the selection changes

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::idempotency::{IdempotencyKey, KeyGenerator, RandomKeyGenerator};
use super::state::{Confirmation, OrderAttempt};
use crate::domain::{CreateOrderRequest, OrderDetails, Product};
use crate::error::{Result, ValidationError};
use crate::format::parse_quantity;
use crate::store::StoreApi;

const INITIAL_QUANTITY: &str = "1";
const INTERRUPTED_MESSAGE: &str = "Order submission was interrupted.";

pub struct CheckoutSession<S, K = RandomKeyGenerator> {
    store: S,
    keys: K,
    products: Vec<Product>,
    selected_id: Option<i64>,
    quantity_text: String,
    idempotency_key: Option<IdempotencyKey>,
    attempt: OrderAttempt,
    catalog_error: Option<String>,
}

impl<S: StoreApi> CheckoutSession<S, RandomKeyGenerator> {
    pub fn new(store: S) -> Self {
        Self::with_key_generator(store, RandomKeyGenerator::default())
    }
}

impl<S: StoreApi, K: KeyGenerator> CheckoutSession<S, K> {
    pub fn with_key_generator(store: S, keys: K) -> Self {
        Self {
            store,
            keys,
            products: Vec::new(),
            selected_id: None,
            quantity_text: INITIAL_QUANTITY.to_string(),
            idempotency_key: None,
            attempt: OrderAttempt::Idle,
            catalog_error: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected_id
    }

    /// Looked up in the current list on every call.
    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selected_id?;
        self.products.iter().find(|p| p.id == id)
    }

    pub fn quantity_text(&self) -> &str {
        &self.quantity_text
    }

    /// Parsed quantity; 0 when the text is not a positive number.
    pub fn quantity(&self) -> u32 {
        parse_quantity(&self.quantity_text).unwrap_or(0)
    }

    pub fn attempt(&self) -> &OrderAttempt {
        &self.attempt
    }

    pub fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }

    /// Message from the last failed catalog refresh
    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    pub fn can_place(&self) -> bool {
        let qty = self.quantity();
        match self.selected_product() {
            Some(product) => qty > 0 && qty <= product.stock && !self.attempt.is_placing(),
            None => false,
        }
    }

    /// Price of the current selection at the current quantity
    pub fn total_preview(&self) -> Option<Decimal> {
        let product = self.selected_product()?;
        match self.quantity() {
            0 => None,
            qty => Some(product.total_for(qty)),
        }
    }

    /// Reload the catalog on user request.
    ///
    /// On failure the previous list is kept and the message is recorded for
    /// display.
    pub async fn refresh_products(&mut self) -> Result<()> {
        self.catalog_error = None;
        match self.store.list_products().await {
            Ok(products) => {
                self.apply_products(products);
                Ok(())
            }
            Err(e) => {
                warn!("failed to load products: {}", e);
                self.catalog_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn apply_products(&mut self, products: Vec<Product>) {
        self.products = products;

        if let Some(id) = self.selected_id {
            if self.selected_product().is_none() {
                debug!("selected product {} no longer listed, clearing selection", id);
                self.selected_id = None;
                self.idempotency_key = None;
            }
        }
    }

    /// Start a new selection: quantity back to 1, display and key cleared.
    pub fn select_product(
        &mut self,
        product_id: i64,
    ) -> std::result::Result<&Product, ValidationError> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or(ValidationError::UnknownProduct(product_id))?;

        if self.products[idx].is_out_of_stock() {
            return Err(ValidationError::OutOfStock {
                name: self.products[idx].name.clone(),
            });
        }

        self.selected_id = Some(product_id);
        self.quantity_text = INITIAL_QUANTITY.to_string();
        self.attempt = OrderAttempt::Idle;
        self.idempotency_key = None;

        Ok(&self.products[idx])
    }

    /// The quantity text changed
    pub fn set_quantity_text(&mut self, text: impl Into<String>) {
        self.quantity_text = text.into();
    }

    /// Move the quantity by `delta`, clamped to `[1, max(1, stock)]`.
    pub fn step_quantity(&mut self, delta: i64) {
        let Some(product) = self.selected_product() else {
            return;
        };

        let max = i64::from(product.stock.max(1));
        let current = i64::from(parse_quantity(&self.quantity_text).unwrap_or(1));
        let next = current.saturating_add(delta).clamp(1, max);
        self.quantity_text = next.to_string();
    }

    /// Local checks run before anything is sent.
    fn validate(&self) -> std::result::Result<CreateOrderRequest, ValidationError> {
        let product = self
            .selected_product()
            .ok_or(ValidationError::NoProductSelected)?;

        let quantity = self.quantity();
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity);
        }
        if quantity > product.stock {
            return Err(ValidationError::InsufficientStock {
                stock: product.stock,
            });
        }

        Ok(CreateOrderRequest {
            product_id: product.id,
            quantity,
        })
    }

    /// Submit the current selection.
    ///
    /// Local check failures never reach the network and leave the key as it
    /// was. The returned state is `Succeeded` or `Failed`.
    ///
    /// Dropping the future while the request is in flight leaves the attempt
    /// `Failed` with the key kept, so the next submit is a safe resend.
    pub async fn place_order(&mut self) -> &OrderAttempt {
        if self.attempt.is_placing() {
            debug!("order already in flight, ignoring submit");
            return &self.attempt;
        }

        self.attempt = OrderAttempt::Idle;

        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                debug!("order rejected locally: {}", e);
                self.attempt = OrderAttempt::Failed(e.to_string());
                return &self.attempt;
            }
        };

        let keys = &self.keys;
        let key = self
            .idempotency_key
            .get_or_insert_with(|| keys.generate())
            .clone();

        info!(
            product_id = request.product_id,
            quantity = request.quantity,
            idempotency_key = %key,
            "placing order"
        );

        let outcome = {
            let placing = PlacingGuard::enter(&mut self.attempt);
            let outcome = self.store.create_order(&request, &key).await;
            placing.finish();
            outcome
        };

        match outcome {
            Ok(resp) => {
                info!(
                    order_id = resp.order_id,
                    total_price = %resp.total_price,
                    "order confirmed"
                );
                // The order exists from here on; later steps only add display data.
                self.idempotency_key = None;
                self.attempt = OrderAttempt::Succeeded(Confirmation::from_response(&resp));

                self.reload_after_order().await;
                let details = self.fetch_details(resp.order_id).await;
                if let OrderAttempt::Succeeded(confirmation) = &mut self.attempt {
                    confirmation.details = details;
                }
            }
            Err(e) => {
                warn!(idempotency_key = %key, "order failed: {}", e);
                self.attempt = OrderAttempt::Failed(e.user_message());
            }
        }

        &self.attempt
    }

    async fn reload_after_order(&mut self) {
        match self.store.list_products().await {
            Ok(products) => self.apply_products(products),
            Err(e) => warn!("stock reload after order failed: {}", e),
        }
    }

    async fn fetch_details(&self, order_id: i64) -> Option<OrderDetails> {
        match self.store.get_order(order_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                debug!("order {} details unavailable: {}", order_id, e);
                None
            }
        }
    }
}

/// Holds the attempt in `Placing` for the duration of the request.
struct PlacingGuard<'a> {
    attempt: &'a mut OrderAttempt,
    finished: bool,
}

impl<'a> PlacingGuard<'a> {
    fn enter(attempt: &'a mut OrderAttempt) -> Self {
        *attempt = OrderAttempt::Placing;
        Self {
            attempt,
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for PlacingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished && self.attempt.is_placing() {
            warn!("order submission dropped while in flight");
            *self.attempt = OrderAttempt::Failed(INTERRUPTED_MESSAGE.to_string());
        }
    }
}
