pub mod idempotency;
pub mod session;
pub mod state;

pub use idempotency::{IdempotencyKey, KeyFormat, KeyGenerator, RandomKeyGenerator};
pub use session::CheckoutSession;
pub use state::{Confirmation, OrderAttempt};
