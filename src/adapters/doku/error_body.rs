//! Extraction of human-readable messages from gateway error bodies.

use serde::Deserialize;

/// Longest raw body excerpt carried into an error message.
const MAX_RAW_EXCERPT: usize = 200;

#[derive(Deserialize)]
struct MessageList {
    message: MessageField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageField {
    Many(Vec<String>),
    One(String),
}

#[derive(Deserialize)]
struct NestedError {
    error: NestedErrorBody,
}

#[derive(Deserialize)]
struct NestedErrorBody {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapError {
    response_message: String,
}

/// Best-effort message for a non-2xx body.
///
/// Tries `{"message": [...]}`, then `{"error": {"message": ...}}`, then the
/// SNAP `{"responseMessage": ...}`, and finally the raw text, truncated.
pub fn parse_error_message(body: &[u8]) -> String {
    if let Ok(list) = serde_json::from_slice::<MessageList>(body) {
        let joined = match list.message {
            MessageField::Many(messages) => messages.join("; "),
            MessageField::One(message) => message,
        };
        if !joined.is_empty() {
            return joined;
        }
    }
    if let Ok(nested) = serde_json::from_slice::<NestedError>(body) {
        return nested.error.message;
    }
    if let Ok(snap) = serde_json::from_slice::<SnapError>(body) {
        return snap.response_message;
    }

    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        return "empty response body".to_string();
    }
    match raw.char_indices().nth(MAX_RAW_EXCERPT) {
        Some((cut, _)) => format!("{}…", &raw[..cut]),
        None => raw.to_string(),
    }
}
