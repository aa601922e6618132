pub mod rest_client;
pub mod store_client;

pub use rest_client::{decode_payload, ApiRequest, RestClient};
pub use store_client::{order_path, HttpStoreClient, IDEMPOTENCY_KEY_HEADER};
