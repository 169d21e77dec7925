//! Provider download pipeline.
//!
//! Turns a resource page URL into the file behind it: resource ID extraction,
//! authenticated lookup of a signed link, and a single fetch of that link
//! delivered into memory or onto disk.
//!
//! # Features
//!
//! - One code path for both delivery modes ([`DeliveryMode`])
//! - Streaming writes for `ToDisk` (no double buffering)
//! - Configurable connect/request timeouts (10s connect, 5min request by default)
//! - One distinguishable error kind per failure stage ([`FetchErrorKind`])
//!
//! # Example
//!
//! ```no_run
//! use freepik_dl_core::download::{ApiKey, DeliveryMode, Fetcher, FetcherConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetcherConfig::with_api_key(ApiKey::new("my-key")).output_dir("./downloads");
//! let fetcher = Fetcher::new(config)?;
//! let artifact = fetcher
//!     .download("https://www.freepik.com/free-vector/icons_98765.htm", DeliveryMode::ToDisk)
//!     .await?;
//! println!("Saved: {}", artifact.filename());
//! # Ok(())
//! # }
//! ```

pub(crate) mod client;
mod config;
pub mod constants;
mod error;
mod fetcher;
mod lookup;

pub use config::{ApiKey, ConfigError, FetcherConfig};
pub use error::{FetchError, FetchErrorKind};
pub use fetcher::{DeliveryMode, DownloadArtifact, Fetcher};
pub use lookup::ProviderLookupResult;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, FetchError>` explicitly in function signatures.
