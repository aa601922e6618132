use thiserror::Error;

use crate::domain::ProblemDetail;

/// Main error type for the storefront client
#[derive(Error, Debug)]
pub enum CommerceError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Request(#[from] RequestError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Local checks that never reach the network
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Order placement ended in the Failed state
    #[error("Order failed: {0}")]
    OrderFailed(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CommerceError {
    /// Text shown to the user when an operation fails.
    ///
    /// A problem `detail` returned by the server wins over everything else;
    /// otherwise the message of the underlying error is used as is.
    pub fn user_message(&self) -> String {
        match self {
            CommerceError::Request(err) => err
                .problem_detail()
                .map(str::to_string)
                .unwrap_or_else(|| err.message.clone()),
            CommerceError::Http(err) => err.to_string(),
            CommerceError::Validation(err) => err.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a non-2xx response, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CommerceError::Request(err) => Some(err.status),
            CommerceError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for CommerceError
pub type Result<T> = std::result::Result<T, CommerceError>;

/// A response whose status was outside `[200, 300)`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct RequestError {
    pub status: u16,
    pub message: String,
    pub problem: Option<ProblemDetail>,
}

impl RequestError {
    /// Build the error from a status code and the raw response body.
    ///
    /// The message is the problem `detail`, then the problem `title`, then
    /// a synthesized `Request failed (status N)`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let problem = ProblemDetail::parse(body);
        let message = problem
            .as_ref()
            .and_then(|p| p.detail().or_else(|| p.title()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed (status {status})"));

        Self {
            status,
            message,
            problem,
        }
    }

    pub fn problem_detail(&self) -> Option<&str> {
        self.problem.as_ref().and_then(ProblemDetail::detail)
    }
}

/// Local order checks, with the wording shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a product first.")]
    NoProductSelected,

    #[error("Please input a valid quantity (positive integer).")]
    InvalidQuantity,

    #[error("Only {stock} left in stock.")]
    InsufficientStock { stock: u32 },

    #[error("Product {0} not found.")]
    UnknownProduct(i64),

    #[error("{name} is out of stock.")]
    OutOfStock { name: String },
}
