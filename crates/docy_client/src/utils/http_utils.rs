use std::error::Error;

use log::error;
use serde_json::Value;

use crate::error::{ApiError, Result, FALLBACK_MESSAGE};

const MAX_TEXT_ERROR_LEN: usize = 300;

/// Extract a readable message from an error response body.
///
/// Understands the API's `{"detail": "..."}`, validation errors of the form
/// `{"detail": [{"msg": "..."}]}` and `{"message": "..."}`. Plain-text bodies
/// are returned trimmed and truncated.
pub fn error_message_from_body(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = message_from_json(&value) {
            return message;
        }
        return FALLBACK_MESSAGE.to_string();
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }
    text.chars().take(MAX_TEXT_ERROR_LEN).collect()
}

fn message_from_json(value: &Value) -> Option<String> {
    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let first = items.first()?;
            let msg = first.get("msg").and_then(Value::as_str)?;
            let field = first
                .get("loc")
                .and_then(Value::as_array)
                .and_then(|loc| loc.last())
                .and_then(Value::as_str);
            return Some(match field {
                Some(field) => format!("{field}: {msg}"),
                None => msg.to_string(),
            });
        }
        _ => {}
    }
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Decode a success body. Empty bodies and JSON `null` mean "no payload".
pub fn decode_body(body: &[u8]) -> Result<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(ApiError::malformed(e)),
    }
}

/// Log the details of a failed request and turn it into a `Network` error.
pub fn transport_error(url: &str, err: &reqwest_middleware::Error) -> ApiError {
    let error_msg = format!("Failed HTTP request to {url}: {err}");
    error!("{}", error_msg);

    if let Some(source) = err.source() {
        error!("Error source: {:?}", source);
    }

    if let reqwest_middleware::Error::Reqwest(e) = err {
        if e.is_timeout() {
            error!("Request timed out");
        }
        if e.is_connect() {
            error!("Connection error");
        }
        if e.is_body() {
            error!("Body error");
        }
    }

    ApiError::Network(error_msg)
}
