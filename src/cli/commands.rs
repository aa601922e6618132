//! One-shot storefront commands.

use std::time::Duration;
use tracing::{info, warn};

use super::output::{self, OutputMode};
use crate::adapters::HttpStoreClient;
use crate::checkout::{CheckoutSession, OrderAttempt, RandomKeyGenerator};
use crate::config::AppConfig;
use crate::error::{CommerceError, Result};
use crate::store::StoreApi;

const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

pub async fn list_products(config: &AppConfig, mode: OutputMode) -> Result<()> {
    let client = HttpStoreClient::from_config(&config.api)?;
    let products = client.list_products().await?;
    output::print_products(&products, None, config.catalog.low_stock_threshold, mode)
}

/// Place one order, resubmitting up to `retries` times on request failure.
///
/// Every resubmission goes through the same session, so it carries the
/// idempotency key of the first attempt.
pub async fn place_order(
    config: &AppConfig,
    product_id: i64,
    quantity: &str,
    retries: u32,
    mode: OutputMode,
) -> Result<()> {
    let client = HttpStoreClient::from_config(&config.api)?;
    let keys = RandomKeyGenerator::new(config.checkout.key_format);
    let mut session = CheckoutSession::with_key_generator(client, keys);

    session.refresh_products().await?;
    session.select_product(product_id)?;
    session.set_quantity_text(quantity);

    let mut retried = 0;
    let attempt = loop {
        let attempt = session.place_order().await.clone();
        let Some(key) = session.idempotency_key() else {
            break attempt;
        };
        if !matches!(attempt, OrderAttempt::Failed(_)) || retried >= retries {
            break attempt;
        }

        retried += 1;
        warn!(
            idempotency_key = %key,
            "order attempt failed, retry {}/{}",
            retried,
            retries
        );
        tokio::time::sleep(RETRY_BASE_DELAY * retried).await;
    };

    output::print_attempt(&attempt, mode)?;
    match attempt {
        OrderAttempt::Failed(msg) => Err(CommerceError::OrderFailed(msg)),
        _ => Ok(()),
    }
}

pub async fn order_status(config: &AppConfig, order_id: i64, mode: OutputMode) -> Result<()> {
    let client = HttpStoreClient::from_config(&config.api)?;
    let details = client.get_order(order_id).await?;
    info!(order_id, "fetched order");
    output::print_order_details(&details, mode)
}
