use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured error payload returned for 4xx/5xx responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ProblemDetail {
    /// Read a problem payload out of a raw response body.
    ///
    /// Fields of the wrong JSON type are ignored rather than failing the
    /// whole parse. Returns `None` when the body is not a JSON object.
    pub fn parse(body: &str) -> Option<Self> {
        let root: Value = serde_json::from_str(body).ok()?;
        let obj = root.as_object()?;

        let pick_str = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            detail: pick_str("detail"),
            title: pick_str("title"),
            status: obj
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok()),
            path: pick_str("path").or_else(|| pick_str("instance")),
            timestamp: pick_str("timestamp"),
        })
    }

    /// Non-empty `detail`
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref().filter(|s| !s.is_empty())
    }

    /// Non-empty `title`
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }
}

/// Wrapper the backend puts around every 2xx payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub data: T,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_non_string_fields() {
        let pd = ProblemDetail::parse(r#"{"detail":{"nested":true},"title":"Conflict","status":409}"#)
            .expect("object body should parse");
        assert_eq!(pd.detail(), None);
        assert_eq!(pd.title(), Some("Conflict"));
        assert_eq!(pd.status, Some(409));
    }

    #[test]
    fn parse_rejects_non_object_bodies() {
        assert!(ProblemDetail::parse("").is_none());
        assert!(ProblemDetail::parse("upstream timeout").is_none());
        assert!(ProblemDetail::parse("[1,2]").is_none());
    }

    #[test]
    fn envelope_exposes_data() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"OK","data":[1,2],"timestamp":"2026-02-06T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(env.status, "OK");
        assert_eq!(env.data, vec![1, 2]);
    }
}
