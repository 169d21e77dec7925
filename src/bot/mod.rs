//! Chat front end: command parsing, dispatch, and the Telegram transport.
//!
//! # Architecture
//!
//! - [`parse_command`] - Pure parser from message text to [`BotCommand`]
//! - [`Dispatcher`] - Maps commands to replies; `/d` downloads through a [`ResourceSource`]
//! - [`TelegramClient`] - Bot API client and long-polling loop, also the [`Responder`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use freepik_dl_core::bot::{
//!     DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_TELEGRAM_API_BASE, Dispatcher, TelegramClient,
//! };
//! use freepik_dl_core::download::{ApiKey, Fetcher, FetcherConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::new(FetcherConfig::with_api_key(ApiKey::new("my-key")))?;
//! let dispatcher = Dispatcher::new(Arc::new(fetcher));
//! let telegram =
//!     TelegramClient::new(DEFAULT_TELEGRAM_API_BASE, "123:ABC", DEFAULT_POLL_TIMEOUT_SECS)?;
//! telegram.run_polling(&dispatcher).await?;
//! # Ok(())
//! # }
//! ```

mod command;
mod dispatch;
mod error;
mod telegram;

pub use command::{BotCommand, parse_command};
pub use dispatch::{Dispatcher, IncomingMessage, Outgoing, ResourceSource, Responder, failure_text};
pub use error::TelegramError;
pub use telegram::{
    Chat, DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_TELEGRAM_API_BASE, Message, TelegramClient, Update,
    User,
};
