//! Freepik download core.
//!
//! Turns a resource page URL into the file behind it, through the provider's
//! authenticated download API, and serves that pipeline to a Telegram bot.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Resource ID extraction and URL detection in chat text
//! - [`download`] - Lookup, fetch and delivery of provider resources
//! - [`bot`] - Chat command dispatch and the Telegram Bot API transport

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod download;
pub mod parser;
mod user_agent;

// Re-export commonly used types
pub use download::{
    ApiKey, ConfigError, DeliveryMode, DownloadArtifact, FetchError, FetchErrorKind, Fetcher,
    FetcherConfig,
};
pub use parser::extract_resource_id;
