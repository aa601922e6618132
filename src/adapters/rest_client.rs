//! JSON-over-HTTP request wrapper for the store backend.
//!
//! Every call is judged by its status code, not by whether the transport
//! completed: anything outside `[200, 300)` becomes a [`RequestError`] whose
//! message comes from the problem payload when the server sent one.
//!
//! The backend is not uniform about success bodies. `/products` answers with
//! a bare array while the order endpoints wrap their payload in
//! `{status, data, timestamp}`, so the shape is decided per response.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::ApiConfig;
use crate::domain::ApiEnvelope;
use crate::error::{CommerceError, RequestError, Result};

/// Description of one backend call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<String>,
    headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body and the matching `content-type` header.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value).map_err(|e| {
            CommerceError::Internal(format!("invalid value for header {}: {}", name, e))
        })?;
        self.headers.insert(HeaderName::from_static(name), value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("mini-commerce/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| CommerceError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform the call and decode the 2xx payload.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut req = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers);
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "store api response"
        );

        if !status.is_success() {
            return Err(RequestError::from_response(status.as_u16(), &text).into());
        }

        decode_payload(&text)
    }
}

/// Decode a 2xx body, unwrapping the envelope when the backend sent one.
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value = serde_json::from_str(body)?;
    if is_envelope(&value) {
        let envelope: ApiEnvelope<T> = serde_json::from_value(value)?;
        return Ok(envelope.data);
    }
    Ok(serde_json::from_value(value)?)
}

/// An object with a string `status` and a `data` member.
fn is_envelope(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| {
        obj.contains_key("data") && obj.get("status").is_some_and(Value::is_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateOrderResponse, Product};
    use rust_decimal_macros::dec;

    #[test]
    fn json_sets_content_type() {
        let req = ApiRequest::post("/orders")
            .json(&serde_json::json!({"productId": 1}))
            .unwrap();
        assert_eq!(
            req.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap(),
            "application/json"
        );
        assert_eq!(req.method(), &Method::POST);
        assert_eq!(req.path(), "/orders");
    }

    #[test]
    fn header_rejects_control_characters() {
        let err = ApiRequest::get("/products")
            .header("idempotency-key", "bad\nvalue")
            .unwrap_err();
        assert!(matches!(err, CommerceError::Internal(_)));
    }

    #[test]
    fn decode_unwraps_envelope() {
        let body = r#"{"status":"CREATED","data":{"orderId":42,"totalPrice":29.97},"timestamp":"2026-02-06T10:00:00Z"}"#;
        let resp: CreateOrderResponse = decode_payload(body).unwrap();
        assert_eq!(resp.order_id, 42);
        assert_eq!(resp.total_price, dec!(29.97));
    }

    #[test]
    fn decode_bare_payload() {
        let body = r#"{"orderId":7,"totalPrice":5}"#;
        let resp: CreateOrderResponse = decode_payload(body).unwrap();
        assert_eq!(resp.order_id, 7);
    }

    #[test]
    fn decode_bare_product_array() {
        let body = r#"[{"id":1,"name":"Widget","price":9.99,"stock":5}]"#;
        let products: Vec<Product> = decode_payload(body).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, dec!(9.99));

        let empty: Vec<Product> = decode_payload("[]").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn decode_envelope_with_bad_data_is_json_error() {
        let body = r#"{"status":"OK","data":{"orderId":"x"}}"#;
        let err = decode_payload::<CreateOrderResponse>(body).unwrap_err();
        assert!(matches!(err, CommerceError::Json(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = RestClient::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }
}
