//! Command dispatch: turns incoming chat messages into outgoing actions.
//!
//! The dispatcher knows nothing about Telegram; it talks to the download core
//! through [`ResourceSource`] and to the chat through [`Responder`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::command::{
    ABOUT_TEXT, BotCommand, CONTACT_TEXT, DOWNLOADING_TEXT, HELP_TEXT, SENT_PRIVATELY_TEXT,
    START_TEXT, UNKNOWN_TEXT, USAGE_TEXT, parse_command,
};
use crate::download::{DeliveryMode, DownloadArtifact, FetchError, Fetcher};

/// Filename used for documents when the provider returns none.
const FALLBACK_DOCUMENT_NAME: &str = "download";

/// Reply when the source hands back a file on disk instead of bytes.
const NOT_BUFFERED_TEXT: &str = "The file was saved on the server but could not be sent here.";

/// Source of downloadable resources, seen from the chat side.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetches the resource behind `url` into memory.
    async fn fetch_to_memory(&self, url: &str) -> Result<DownloadArtifact, FetchError>;
}

#[async_trait]
impl ResourceSource for Fetcher {
    async fn fetch_to_memory(&self, url: &str) -> Result<DownloadArtifact, FetchError> {
        self.download(url, DeliveryMode::ToMemory).await
    }
}

/// Sink for outgoing actions. Implementations log their own failures.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Delivers one action to the chat.
    async fn deliver(&self, action: Outgoing);
}

/// A chat message addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Chat the message was posted in.
    pub chat_id: i64,
    /// Message ID, used for threaded replies.
    pub message_id: i64,
    /// Sender user ID; absent for channel posts.
    pub sender_id: Option<i64>,
    /// Sender username, or first name when there is none.
    pub sender_name: Option<String>,
    pub text: String,
}

/// An action the bot performs in response to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// A text message.
    Text {
        /// Destination chat.
        chat_id: i64,
        /// Message body.
        text: String,
        /// Message to reply to, if any.
        reply_to: Option<i64>,
    },
    /// A file upload.
    Document {
        /// Destination chat.
        chat_id: i64,
        /// Name shown for the document.
        filename: String,
        /// File contents.
        bytes: Vec<u8>,
    },
}

impl Outgoing {
    fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self::Text {
            chat_id,
            text: text.into(),
            reply_to: None,
        }
    }

    fn reply(chat_id: i64, text: impl Into<String>, message_id: i64) -> Self {
        Self::Text {
            chat_id,
            text: text.into(),
            reply_to: Some(message_id),
        }
    }
}

/// Routes parsed commands to replies and downloads.
#[derive(Clone)]
pub struct Dispatcher {
    source: Arc<dyn ResourceSource>,
}

impl Dispatcher {
    /// Creates a dispatcher backed by `source`.
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        Self { source }
    }

    /// Handles one incoming message, delivering every resulting action in order.
    pub async fn handle(&self, message: &IncomingMessage, responder: &dyn Responder) {
        info!(
            chat_id = message.chat_id,
            sender = message.sender_name.as_deref().unwrap_or("-"),
            text = %message.text,
            "incoming message"
        );

        let chat_id = message.chat_id;
        match parse_command(&message.text) {
            BotCommand::Start => responder.deliver(Outgoing::text(chat_id, START_TEXT)).await,
            BotCommand::Help => responder.deliver(Outgoing::text(chat_id, HELP_TEXT)).await,
            BotCommand::About => responder.deliver(Outgoing::text(chat_id, ABOUT_TEXT)).await,
            BotCommand::Contact => responder.deliver(Outgoing::text(chat_id, CONTACT_TEXT)).await,
            BotCommand::DownloadUsage => {
                responder.deliver(Outgoing::text(chat_id, USAGE_TEXT)).await;
            }
            BotCommand::Unknown(_) => {
                responder.deliver(Outgoing::text(chat_id, UNKNOWN_TEXT)).await;
            }
            BotCommand::Text(text) => {
                responder
                    .deliver(Outgoing::reply(
                        chat_id,
                        format!("You said: {text}"),
                        message.message_id,
                    ))
                    .await;
            }
            BotCommand::Download { url } => self.download(message, &url, responder).await,
        }
    }

    async fn download(&self, message: &IncomingMessage, url: &str, responder: &dyn Responder) {
        // Files go to the sender's private chat; channel posts have no sender.
        let private_chat = message.sender_id.unwrap_or(message.chat_id);

        responder
            .deliver(Outgoing::text(private_chat, DOWNLOADING_TEXT))
            .await;

        match self.source.fetch_to_memory(url).await {
            Ok(DownloadArtifact::InMemory { bytes, filename }) => {
                let filename = if filename.is_empty() {
                    FALLBACK_DOCUMENT_NAME.to_string()
                } else {
                    filename
                };
                info!(filename = %filename, bytes = bytes.len(), "sending document");
                responder
                    .deliver(Outgoing::Document {
                        chat_id: private_chat,
                        filename,
                        bytes,
                    })
                    .await;
                if private_chat != message.chat_id {
                    responder
                        .deliver(Outgoing::text(message.chat_id, SENT_PRIVATELY_TEXT))
                        .await;
                }
            }
            Ok(DownloadArtifact::Persisted { path, .. }) => {
                warn!(path = %path.display(), "resource source persisted instead of buffering");
                responder
                    .deliver(Outgoing::reply(
                        message.chat_id,
                        NOT_BUFFERED_TEXT,
                        message.message_id,
                    ))
                    .await;
            }
            Err(error) => {
                // Kind and status only: the error may carry the signed download URL.
                warn!(kind = ?error.kind(), status = ?error.status(), "download failed");
                responder
                    .deliver(Outgoing::reply(
                        message.chat_id,
                        failure_text(&error),
                        message.message_id,
                    ))
                    .await;
            }
        }
    }
}

/// User-facing text for a failed download, one per error kind.
#[must_use]
pub fn failure_text(error: &FetchError) -> String {
    match error {
        FetchError::MissingCredential => {
            "This bot has no provider API key configured. Please tell the administrator."
                .to_string()
        }
        FetchError::RequestFailed { .. } => {
            "Couldn't reach the provider. Please try again later.".to_string()
        }
        FetchError::ApiError { status, .. } => {
            format!("The provider refused this resource (HTTP {status}).")
        }
        FetchError::DecodeFailed { .. } => {
            "The provider sent a response I couldn't understand.".to_string()
        }
        FetchError::InvalidResponse { .. } => {
            "This is already free. Don't waste my time.".to_string()
        }
        FetchError::DownloadFailed { status, .. } => {
            format!("The file download failed (HTTP {status}).")
        }
        FetchError::PersistFailed { .. } => {
            "Something went wrong while preparing the file.".to_string()
        }
    }
}
