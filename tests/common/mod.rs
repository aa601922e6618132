#![allow(dead_code)]

use httpmock::MockServer;
use mini_commerce::{HttpStoreClient, IdempotencyKey, KeyGenerator, RestClient};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn store_client(base_url: &str) -> HttpStoreClient {
    let rest = RestClient::new(base_url, Duration::from_secs(5)).expect("client should build");
    HttpStoreClient::new(rest)
}

pub fn client_for(server: &MockServer) -> HttpStoreClient {
    store_client(&server.url("/api"))
}

pub fn envelope(status: &str, data: Value) -> Value {
    json!({
        "status": status,
        "data": data,
        "timestamp": "2026-02-06T10:00:00Z"
    })
}

/// Hands out "<prefix>-1", "<prefix>-2", ...
pub struct CountingKeys {
    prefix: &'static str,
    next: AtomicUsize,
}

impl CountingKeys {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicUsize::new(1),
        }
    }
}

impl KeyGenerator for CountingKeys {
    fn generate(&self) -> IdempotencyKey {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        IdempotencyKey::new(format!("{}-{}", self.prefix, n))
    }
}
