use std::time::Duration;

use jsonschema::JSONSchema;
use serde_json::{json, Value};

use crate::error::{BridgeError, Result};

use super::dto::LocaleBundle;

/// Client for the remote locale catalog. Transport and decode failures
/// degrade to an empty bundle list; the negotiator never sees them.
pub struct LocaleCatalog {
    http: reqwest::Client,
    base_url: String,
    entry_schema: Option<JSONSchema>,
}

impl LocaleCatalog {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("Storefront-Bridge/0.1.0")
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                reqwest::Client::new()
            });

        let schema_value = entry_schema();
        let entry_schema = match JSONSchema::compile(&schema_value) {
            Ok(schema) => Some(schema),
            Err(e) => {
                tracing::error!("Failed to compile catalog entry schema: {}", e);
                None
            }
        };

        Self {
            http,
            base_url: base_url.into(),
            entry_schema,
        }
    }

    pub async fn fetch_bundles(&self, subject_id: &str) -> Vec<LocaleBundle> {
        match self.request_feed(subject_id).await {
            Ok(feed) => self.screen_feed(subject_id, &feed),
            Err(e) => {
                tracing::warn!("Locale catalog unavailable for {}: {}", subject_id, e);
                Vec::new()
            }
        }
    }

    async fn request_feed(&self, subject_id: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), subject_id);
        let feed = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(BridgeError::NetworkError)?
            .error_for_status()
            .map_err(BridgeError::NetworkError)?
            .json::<Value>()
            .await
            .map_err(BridgeError::NetworkError)?;
        Ok(feed)
    }

    /// Screens a raw feed into bundles. Entries that fail schema validation,
    /// fail to decode, or belong to another subject are dropped one by one;
    /// the rest of the feed survives.
    pub fn screen_feed(&self, subject_id: &str, feed: &Value) -> Vec<LocaleBundle> {
        let entries = match feed.get("translations").and_then(Value::as_array) {
            Some(entries) => entries,
            None => {
                tracing::warn!(
                    "Locale catalog feed for {} has no translations array",
                    subject_id
                );
                return Vec::new();
            }
        };

        let mut bundles = Vec::new();
        for entry in entries {
            if let Some(schema) = &self.entry_schema {
                if !schema.is_valid(entry) {
                    tracing::warn!("Dropping malformed catalog entry for {}", subject_id);
                    continue;
                }
            }

            match serde_json::from_value::<LocaleBundle>(entry.clone()) {
                Ok(bundle) if bundle.subject_id == subject_id => bundles.push(bundle),
                Ok(bundle) => {
                    tracing::warn!(
                        "Dropping catalog entry owned by {} while fetching {}",
                        bundle.subject_id,
                        subject_id
                    );
                }
                Err(e) => {
                    tracing::warn!("Dropping undecodable catalog entry for {}: {}", subject_id, e);
                }
            }
        }

        bundles
    }
}

fn entry_schema() -> Value {
    json!({
        "type": "object",
        "required": ["subject_id", "language", "updated_at"],
        "properties": {
            "subject_id": { "type": "string", "minLength": 1 },
            "language": { "type": "string", "minLength": 1 },
            "updated_at": { "type": "string", "minLength": 1 },
            "package": { "type": "object" }
        }
    })
}
