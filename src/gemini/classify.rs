//! Failure classification for key validation.
//!
//! Maps raw backend errors into a small closed set of failure kinds. The
//! mapping is coarse and best-effort: the API does not expose a structured
//! error-kind contract, so classification falls back to status codes and
//! well-known substrings in the error body.

use std::fmt;

use super::client::GeminiError;

/// Maximum length of the detail carried by `KeyFailure::Other`.
const OTHER_DETAIL_MAX: usize = 80;

/// Why a key was rejected during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFailure {
    /// Quota or rate limit exceeded (HTTP 429 / RESOURCE_EXHAUSTED).
    QuotaExhausted,
    /// Malformed, revoked, or unauthorized key.
    InvalidKey,
    /// The key is live but unlocks no model that supports generation.
    NoModel,
    /// Anything else: transport errors, unrecognized API errors.
    Other(String),
}

impl fmt::Display for KeyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFailure::QuotaExhausted => write!(f, "quota exhausted"),
            KeyFailure::InvalidKey => write!(f, "invalid key"),
            KeyFailure::NoModel => write!(f, "no eligible model"),
            KeyFailure::Other(detail) => write!(f, "error: {}", detail),
        }
    }
}

/// Classify a backend error into a `KeyFailure`.
pub fn classify(error: &GeminiError) -> KeyFailure {
    match error {
        GeminiError::Api { status, message } => classify_api_error(*status, message),
        GeminiError::Http(e) => KeyFailure::Other(truncate(&e.to_string())),
        GeminiError::EmptyResponse => KeyFailure::Other("empty response".to_string()),
        GeminiError::EmptyPrompt => KeyFailure::Other("empty prompt".to_string()),
    }
}

fn classify_api_error(status: u16, message: &str) -> KeyFailure {
    let lower = message.to_lowercase();

    if status == 429 || lower.contains("resource_exhausted") || lower.contains("quota") {
        return KeyFailure::QuotaExhausted;
    }

    if status == 400
        || status == 401
        || status == 403
        || lower.contains("api_key_invalid")
        || lower.contains("api key not valid")
        || lower.contains("permission_denied")
    {
        return KeyFailure::InvalidKey;
    }

    KeyFailure::Other(truncate(message))
}

fn truncate(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.len() <= OTHER_DETAIL_MAX {
        trimmed.to_string()
    } else {
        let mut end = OTHER_DETAIL_MAX;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    }
}
