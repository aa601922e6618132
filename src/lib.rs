pub mod adapters;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod format;
pub mod store;

pub use adapters::{HttpStoreClient, RestClient};
pub use checkout::{
    CheckoutSession, Confirmation, IdempotencyKey, KeyFormat, KeyGenerator, OrderAttempt,
    RandomKeyGenerator,
};
pub use config::AppConfig;
pub use domain::{CreateOrderRequest, CreateOrderResponse, OrderDetails, Product, StockLevel};
pub use error::{CommerceError, RequestError, Result, ValidationError};
pub use store::StoreApi;
