//! Minimal Telegram Bot API client over reqwest, with long polling.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::dispatch::{Dispatcher, IncomingMessage, Outgoing, Responder};
use super::error::TelegramError;
use crate::download::ConfigError;
use crate::download::client::build_http_client;

/// Default Bot API base URL.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Default long-poll timeout passed to `getUpdates`.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 60;

/// Pause after a failed `getUpdates` before polling again.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Connect timeout for Bot API requests.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Extra request time on top of the long-poll timeout.
const POLL_SLACK_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// A Bot API user (the bot itself or a message sender).
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
}

/// The chat a message was posted in.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// An incoming chat message. Only the fields the bot reads are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    /// Sender; absent for channel posts.
    pub from: Option<User>,
    pub chat: Chat,
    /// Message text; absent for media without a caption.
    pub text: Option<String>,
}

/// One entry from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic ID; the next poll acknowledges it with `offset = update_id + 1`.
    pub update_id: i64,
    /// Present for new messages; other update types are ignored.
    pub message: Option<Message>,
}

impl Update {
    /// Converts a text message update into dispatcher input.
    #[must_use]
    pub fn into_incoming(self) -> Option<IncomingMessage> {
        let message = self.message?;
        let text = message.text?;
        Some(IncomingMessage {
            chat_id: message.chat.id,
            message_id: message.message_id,
            sender_id: message.from.as_ref().map(|user| user.id),
            sender_name: message
                .from
                .map(|user| user.username.unwrap_or(user.first_name)),
            text,
        })
    }
}

/// Bot API client.
///
/// `Debug` hides the token.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    api_base: String,
    token: String,
    poll_timeout_secs: u64,
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_base", &self.api_base)
            .field("token", &"***")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

impl TelegramClient {
    /// Creates a client for `token` against `api_base`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] when the HTTP client cannot be built.
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        poll_timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        let client = build_http_client(
            "telegram",
            CONNECT_TIMEOUT_SECS,
            poll_timeout_secs + POLL_SLACK_SECS,
        )?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            poll_timeout_secs,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TelegramError> {
        let response = request
            .send()
            .await
            .map_err(|e| TelegramError::request(method, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TelegramError::request(method, e))?;

        match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
            Ok(ApiEnvelope {
                ok: true,
                result: Some(result),
                ..
            }) => Ok(result),
            Ok(envelope) => Err(TelegramError::api(
                method,
                envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP {status} without result")),
            )),
            Err(_) if !status.is_success() => {
                Err(TelegramError::api(method, format!("HTTP {status}")))
            }
            Err(e) => Err(TelegramError::decode(method, e)),
        }
    }

    /// Returns the bot's own account; used to verify the token.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", self.client.get(self.method_url("getMe")))
            .await
    }

    /// Long-polls for updates after `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let mut body = json!({
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call(
            "getUpdates",
            self.client.post(self.method_url("getUpdates")).json(&body),
        )
        .await
    }

    /// Sends a text message, optionally as a reply.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<Message, TelegramError> {
        let mut body = json!({ "chat_id": chat_id, "text": text });
        if let Some(message_id) = reply_to {
            body["reply_parameters"] = json!({
                "message_id": message_id,
                "allow_sending_without_reply": true,
            });
        }
        self.call(
            "sendMessage",
            self.client.post(self.method_url("sendMessage")).json(&body),
        )
        .await
    }

    /// Uploads `bytes` as a document named `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn send_document(
        &self,
        chat_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Message, TelegramError> {
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", Part::bytes(bytes).file_name(filename.to_string()));
        self.call(
            "sendDocument",
            self.client
                .post(self.method_url("sendDocument"))
                .multipart(form),
        )
        .await
    }

    /// Fetches one batch of updates and dispatches every text message.
    ///
    /// Returns the offset for the next poll.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when `getUpdates` fails; dispatch failures are logged.
    #[instrument(skip(self, dispatcher))]
    pub async fn poll_once(
        &self,
        offset: Option<i64>,
        dispatcher: &Dispatcher,
    ) -> Result<Option<i64>, TelegramError> {
        let updates = self.get_updates(offset).await?;
        debug!(count = updates.len(), "received updates");

        let mut next_offset = offset;
        for update in updates {
            next_offset = Some(next_offset.map_or(update.update_id + 1, |current| {
                current.max(update.update_id + 1)
            }));
            if let Some(message) = update.into_incoming() {
                dispatcher.handle(&message, self).await;
            }
        }
        Ok(next_offset)
    }

    /// Verifies the token, then polls forever.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] only when the initial `getMe` fails.
    pub async fn run_polling(&self, dispatcher: &Dispatcher) -> Result<(), TelegramError> {
        let me = self.get_me().await?;
        info!(
            account = me.username.as_deref().unwrap_or(&me.first_name),
            "authorized on account"
        );

        let mut offset = None;
        loop {
            match self.poll_once(offset, dispatcher).await {
                Ok(next) => offset = next,
                Err(error) => {
                    warn!(error = %error, "polling failed; retrying shortly");
                    tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                }
            }
        }
    }
}

#[async_trait]
impl Responder for TelegramClient {
    async fn deliver(&self, action: Outgoing) {
        let result = match action {
            Outgoing::Text {
                chat_id,
                text,
                reply_to,
            } => self.send_message(chat_id, &text, reply_to).await,
            Outgoing::Document {
                chat_id,
                filename,
                bytes,
            } => self.send_document(chat_id, &filename, bytes).await,
        };
        if let Err(error) = result {
            warn!(error = %error, "failed to deliver bot response");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(DEFAULT_TELEGRAM_API_BASE, "123:SECRET", 30).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("SECRET"), "token leaked in: {debug}");
    }

    #[test]
    fn test_method_url_format() {
        let client = TelegramClient::new("https://api.telegram.org/", "123:ABC", 30).unwrap();
        assert_eq!(
            client.method_url("sendDocument"),
            "https://api.telegram.org/bot123:ABC/sendDocument"
        );
    }

    #[test]
    fn test_update_into_incoming() {
        let update: Update = serde_json::from_str(
            r#"{"update_id":5,"message":{"message_id":9,
                "from":{"id":42,"is_bot":false,"first_name":"Al","username":"alice"},
                "chat":{"id":-100,"type":"group"},"text":"/d https://x.com/a_1"}}"#,
        )
        .unwrap();
        let incoming = update.into_incoming().unwrap();
        assert_eq!(incoming.chat_id, -100);
        assert_eq!(incoming.message_id, 9);
        assert_eq!(incoming.sender_id, Some(42));
        assert_eq!(incoming.sender_name.as_deref(), Some("alice"));
        assert_eq!(incoming.text, "/d https://x.com/a_1");
    }

    #[test]
    fn test_update_without_text_is_skipped() {
        let update: Update = serde_json::from_str(
            r#"{"update_id":5,
                "message":{"message_id":9,"chat":{"id":1,"type":"private"},"photo":[]}}"#,
        )
        .unwrap();
        assert!(update.into_incoming().is_none());

        let update: Update = serde_json::from_str(r#"{"update_id":6}"#).unwrap();
        assert!(update.into_incoming().is_none());
    }
}
