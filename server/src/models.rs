use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened link as held by the store.
///
/// Handed out by value only; the store keeps the authoritative copy.
/// `created_at` serializes as an RFC 3339 UTC timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

impl Record {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            created_at: Utc::now(),
            clicks: 0,
        }
    }
}

/// Body of `POST /api/shorten`.
///
/// `url` stays loosely typed so a missing key and a non-string value can be
/// reported as different errors. `None` means the key was absent; an explicit
/// `null` arrives as `Some(Value::Null)`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default, deserialize_with = "present")]
    pub url: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
