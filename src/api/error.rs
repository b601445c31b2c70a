//! Error type for conversation API calls.

use thiserror::Error;

/// Everything that can go wrong while creating a conversation.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service rejected the request schema (e.g. an unknown replica).
    #[error("Configuration Error: {0}")]
    Configuration(String),

    /// Any other non-success status.
    #[error("HTTP error! status: {status}, message: {message}")]
    Http { status: u16, message: String },

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// A success response whose body is not a conversation record.
    #[error("failed to parse conversation response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request(e.to_string())
    }
}

/// Turn a non-success response into an [`ApiError`].
///
/// A JSON body carrying a non-empty `_schema` value becomes
/// [`ApiError::Configuration`] with its first entry.  Otherwise the message
/// is taken from `message`, then `error`, then the raw body.
pub fn classify_error(status: u16, body: &str) -> ApiError {
    let parsed = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => v,
        Err(_) => {
            return ApiError::Http {
                status,
                message: body.to_string(),
            }
        }
    };

    if let Some(schema) = parsed.get("_schema").filter(|v| is_truthy(v)) {
        let detail = schema
            .get(0)
            .map(value_text)
            .unwrap_or_else(|| schema.to_string());
        return ApiError::Configuration(detail);
    }

    let message = ["message", "error"]
        .iter()
        .filter_map(|key| parsed.get(*key))
        .find(|v| is_truthy(v))
        .map(value_text)
        .unwrap_or_else(|| body.to_string());

    ApiError::Http { status, message }
}

/// Strings are used as-is; anything else is rendered as JSON.
fn value_text(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(v: &serde_json::Value) -> bool {
    match v {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_becomes_configuration_error() {
        let err = classify_error(400, r#"{"_schema":["replica_id invalid"]}"#);
        assert!(matches!(err, ApiError::Configuration(_)));
        assert!(err
            .to_string()
            .contains("Configuration Error: replica_id invalid"));
    }

    #[test]
    fn falsy_schema_falls_through_to_message() {
        let err = classify_error(400, r#"{"_schema":false,"message":"m"}"#);
        assert_eq!(err.to_string(), "HTTP error! status: 400, message: m");

        let err = classify_error(400, r#"{"_schema":"","error":"e"}"#);
        assert_eq!(err.to_string(), "HTTP error! status: 400, message: e");

        let err = classify_error(400, r#"{"_schema":null,"message":"n"}"#);
        assert!(matches!(err, ApiError::Http { .. }));
    }

    #[test]
    fn message_field_is_preferred() {
        let err = classify_error(401, r#"{"message":"Invalid access token","error":"x"}"#);
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 401, message: Invalid access token"
        );
    }

    #[test]
    fn error_field_used_when_message_missing() {
        let err = classify_error(429, r#"{"error":"Too many requests"}"#);
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 429, message: Too many requests"
        );
    }

    #[test]
    fn empty_message_falls_through_to_error() {
        let err = classify_error(500, r#"{"message":"","error":"boom"}"#);
        assert_eq!(err.to_string(), "HTTP error! status: 500, message: boom");
    }

    #[test]
    fn json_without_known_fields_uses_raw_body() {
        let body = r#"{"detail":"nope"}"#;
        let err = classify_error(404, body);
        assert_eq!(
            err.to_string(),
            format!("HTTP error! status: 404, message: {body}")
        );
    }

    #[test]
    fn plain_text_body_is_kept() {
        let err = classify_error(502, "Bad Gateway");
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
