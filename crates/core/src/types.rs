/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A webhook body: an arbitrary JSON object.
pub type WebhookPayload = serde_json::Map<String, serde_json::Value>;
