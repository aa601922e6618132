use chrono::Utc;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Token sent in the `Idempotency-Key` header of `POST /orders`.
///
/// One key covers one logical attempt: every retry of that attempt sends
/// the same key so the server creates at most one order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Textual form of keys built from OS randomness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFormat {
    /// Random (v4) UUID, hyphenated
    #[default]
    Uuid,
    /// 16 random bytes as 32 lowercase hex digits
    Hex,
}

/// Source of fresh idempotency keys
pub trait KeyGenerator: Send + Sync {
    fn generate(&self) -> IdempotencyKey;
}

/// Key generator backed by the operating system's CSPRNG.
///
/// Falls back to a weak timestamp-based key only if the OS source fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeyGenerator {
    format: KeyFormat,
}

impl RandomKeyGenerator {
    pub fn new(format: KeyFormat) -> Self {
        Self { format }
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self) -> IdempotencyKey {
        let mut bytes = [0u8; 16];
        match OsRng.try_fill_bytes(&mut bytes) {
            Ok(()) => IdempotencyKey(encode_random_bytes(bytes, self.format)),
            Err(e) => {
                warn!(
                    "OS randomness unavailable ({}), using weak idempotency key",
                    e
                );
                IdempotencyKey(weak_key())
            }
        }
    }
}

fn encode_random_bytes(bytes: [u8; 16], format: KeyFormat) -> String {
    match format {
        KeyFormat::Uuid => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        KeyFormat::Hex => hex::encode(bytes),
    }
}

/// `<unix-millis>-<hex>`: no collision guarantee, last resort only.
fn weak_key() -> String {
    let now = Utc::now();
    let seed = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_millis()) as u64;
    let suffix: u64 = StdRng::seed_from_u64(seed).gen();
    format!("{}-{:x}", now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_keys_are_v4() {
        let key = RandomKeyGenerator::new(KeyFormat::Uuid).generate();
        let parsed = uuid::Uuid::parse_str(key.as_str()).expect("key should be a uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn hex_keys_are_32_lowercase_digits() {
        let key = RandomKeyGenerator::new(KeyFormat::Hex).generate();
        assert_eq!(key.as_str().len(), 32);
        assert!(key
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn hex_encoding_pads_each_byte() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0x0a;
        bytes[15] = 0xff;
        assert_eq!(
            encode_random_bytes(bytes, KeyFormat::Hex),
            "0a0000000000000000000000000000ff"
        );
    }

    #[test]
    fn keys_do_not_repeat() {
        let generator = RandomKeyGenerator::default();
        let keys: HashSet<_> = (0..256).map(|_| generator.generate()).collect();
        assert_eq!(keys.len(), 256);
    }

    #[test]
    fn weak_key_has_timestamp_prefix() {
        let key = weak_key();
        let (millis, suffix) = key.split_once('-').expect("dash separator");
        assert!(millis.parse::<i64>().is_ok());
        assert!(!suffix.is_empty());
    }

    #[test]
    fn key_format_parses_from_config_strings() {
        let format: KeyFormat = serde_json::from_str(r#""hex""#).unwrap();
        assert_eq!(format, KeyFormat::Hex);
    }
}
