//! Error types for the Telegram transport.

use thiserror::Error;

/// Errors that can occur while talking to the Telegram Bot API.
///
/// Request errors never carry the request URL, because it embeds the bot token.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network-level error calling a Bot API method.
    #[error("Telegram {method} request failed: {source}")]
    Request {
        /// Bot API method name.
        method: &'static str,
        /// The underlying network error, stripped of its URL.
        #[source]
        source: reqwest::Error,
    },

    /// The Bot API answered `ok: false` or a non-success status.
    #[error("Telegram {method} failed: {description}")]
    Api {
        /// Bot API method name.
        method: &'static str,
        /// Error description from the API.
        description: String,
    },

    /// The Bot API response was not the expected JSON shape.
    #[error("could not decode Telegram {method} response: {source}")]
    Decode {
        /// Bot API method name.
        method: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl TelegramError {
    /// Creates a request error, dropping the token-bearing URL.
    pub fn request(method: &'static str, source: reqwest::Error) -> Self {
        Self::Request {
            method,
            source: source.without_url(),
        }
    }

    /// Creates an API error.
    pub fn api(method: &'static str, description: impl Into<String>) -> Self {
        Self::Api {
            method,
            description: description.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(method: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { method, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let msg = TelegramError::api("sendMessage", "Bad Request: chat not found").to_string();
        assert!(msg.contains("sendMessage"), "Expected method in: {msg}");
        assert!(msg.contains("chat not found"), "Expected description in: {msg}");
    }
}
