use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{CreateOrderResponse, OrderDetails};
use crate::format::format_money;

/// Where the current order attempt stands.
///
/// `Succeeded` and `Failed` both leave the session ready for another
/// submit; neither resets the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderAttempt {
    /// Nothing submitted, or the last outcome was cleared
    #[default]
    Idle,
    /// `POST /orders` in flight
    Placing,
    /// The server accepted the order
    Succeeded(Confirmation),
    /// Local check or request failed; the message is shown to the user
    Failed(String),
}

impl OrderAttempt {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAttempt::Idle => "IDLE",
            OrderAttempt::Placing => "PLACING",
            OrderAttempt::Succeeded(_) => "SUCCEEDED",
            OrderAttempt::Failed(_) => "FAILED",
        }
    }

    pub fn is_placing(&self) -> bool {
        matches!(self, OrderAttempt::Placing)
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        match self {
            OrderAttempt::Succeeded(c) => Some(c),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            OrderAttempt::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for OrderAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an accepted order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub order_id: i64,
    pub total_price: Decimal,
    pub message: String,
    /// Filled in by the follow-up `GET /orders/{id}` when it succeeds
    pub details: Option<OrderDetails>,
}

impl Confirmation {
    pub fn from_response(resp: &CreateOrderResponse) -> Self {
        Self {
            order_id: resp.order_id,
            total_price: resp.total_price,
            message: format!(
                "Order confirmed · ID {} · Total {}",
                resp.order_id,
                format_money(resp.total_price)
            ),
            details: None,
        }
    }
}
