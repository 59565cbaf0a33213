use serde::Deserialize;
use serde_json::Value;

/// The backend's uniform response wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: Option<u16>,
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Unwrap a response body to its payload.
///
/// Mirrors the `body.data ?? body` chain: an object carrying a non-null
/// `data` member yields that member, anything else yields the body as-is.
pub fn unwrap_envelope(body: Value) -> Value {
    match body.get("data") {
        Some(data) if !data.is_null() => data.clone(),
        _ => body,
    }
}

/// Extract the backend's error message from a failed response body, if any.
pub fn error_message(body: &Value) -> Option<String> {
    serde_json::from_value::<Envelope>(body.clone())
        .ok()
        .and_then(|envelope| envelope.message)
}
