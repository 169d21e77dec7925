//! Provider resource fetcher.
//!
//! A download runs three stages, each terminal on failure:
//! 1. authenticated lookup of the resource ID for a signed download URL
//! 2. unauthenticated GET of that signed URL
//! 3. delivery into memory or into a file, per [`DeliveryMode`]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::client::build_http_client;
use super::config::{ApiKey, ConfigError, FetcherConfig};
use super::constants::API_KEY_HEADER;
use super::error::FetchError;
use super::lookup::{LookupResponse, ProviderLookupResult};
use crate::parser::extract_resource_id;

/// Where a successful download ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Stream the file into the configured output directory.
    #[default]
    ToDisk,
    /// Buffer the whole file and hand the bytes back.
    ToMemory,
}

/// Result of a successful download. Exactly one shape per [`DeliveryMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadArtifact {
    /// File contents held in memory (`ToMemory`).
    InMemory {
        /// The complete file body.
        bytes: Vec<u8>,
        /// Provider-supplied filename.
        filename: String,
    },
    /// File written to disk (`ToDisk`).
    Persisted {
        /// Provider-supplied filename.
        filename: String,
        /// Where the file was written.
        path: PathBuf,
        /// Number of bytes written.
        bytes_written: u64,
    },
}

impl DownloadArtifact {
    /// Provider-supplied filename, for display.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::InMemory { filename, .. } | Self::Persisted { filename, .. } => filename,
        }
    }

    /// File contents, present only for in-memory artifacts.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::InMemory { bytes, .. } => Some(bytes),
            Self::Persisted { .. } => None,
        }
    }
}

/// Fetches provider resources by page URL.
///
/// Cheap to clone; clones share the connection pool and configuration, so a
/// single instance can serve concurrent downloads.
///
/// # Example
///
/// ```no_run
/// use freepik_dl_core::download::{ApiKey, DeliveryMode, Fetcher, FetcherConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = Fetcher::new(FetcherConfig::with_api_key(ApiKey::new("my-key")))?;
/// let artifact = fetcher
///     .download("https://www.freepik.com/free-photo/cat_12345.htm", DeliveryMode::ToMemory)
///     .await?;
/// println!("{} ({} bytes)", artifact.filename(), artifact.bytes().map_or(0, <[u8]>::len));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: Arc<FetcherConfig>,
}

impl Fetcher {
    /// Validates `config` and builds the HTTP client.
    ///
    /// A missing API key is not an error here; it surfaces per download.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for invalid configuration or client build failure.
    pub fn new(config: FetcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = build_http_client(
            "provider",
            config.connect_timeout_secs,
            config.read_timeout_secs,
        )?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the configuration this fetcher was built with.
    #[must_use]
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Downloads the resource behind a provider page URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] for the first stage that fails; no later stage runs.
    /// Without a configured API key this fails before any request is sent.
    #[instrument(skip(self), fields(url = %url, mode = ?mode))]
    pub async fn download(
        &self,
        url: &str,
        mode: DeliveryMode,
    ) -> Result<DownloadArtifact, FetchError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(FetchError::MissingCredential)?;

        let resource_id = extract_resource_id(url);
        debug!(resource_id = %resource_id, "resolved resource id");

        let lookup = self.lookup(&resource_id, api_key).await?;
        let response = self.fetch(&lookup.url).await?;

        match mode {
            DeliveryMode::ToMemory => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| FetchError::request_failed(&lookup.url, e))?;
                info!(filename = %lookup.filename, bytes = bytes.len(), "download complete");
                Ok(DownloadArtifact::InMemory {
                    bytes: bytes.to_vec(),
                    filename: lookup.filename,
                })
            }
            DeliveryMode::ToDisk => {
                let path = self.config.output_dir.join(&lookup.filename);
                let bytes_written = persist(response, &lookup.url, &path).await?;
                info!(path = %path.display(), bytes = bytes_written, "download complete");
                Ok(DownloadArtifact::Persisted {
                    filename: lookup.filename,
                    path,
                    bytes_written,
                })
            }
        }
    }

    /// Exchanges a resource ID for a signed download location.
    ///
    /// # Errors
    ///
    /// `RequestFailed`, `ApiError`, `DecodeFailed` or `InvalidResponse`.
    #[instrument(skip(self, api_key), fields(resource_id = %resource_id))]
    pub async fn lookup(
        &self,
        resource_id: &str,
        api_key: &ApiKey,
    ) -> Result<ProviderLookupResult, FetchError> {
        let lookup_url = self.config.lookup_url(resource_id);
        debug!(lookup_url = %lookup_url, "requesting download link");

        let response = self
            .client
            .get(&lookup_url)
            .header(API_KEY_HEADER, api_key.expose())
            .send()
            .await
            .map_err(|e| FetchError::request_failed(&lookup_url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::api_error(resource_id, status.as_u16(), body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::request_failed(&lookup_url, e))?;
        // A bare `null` body decodes to an empty result.
        let decoded = serde_json::from_slice::<Option<LookupResponse>>(&body)
            .map_err(|e| FetchError::decode_failed(resource_id, e))?
            .unwrap_or_default();

        if decoded.data.url.is_empty() {
            return Err(FetchError::invalid_response(resource_id));
        }

        debug!(filename = %decoded.data.filename, "download link issued");
        Ok(decoded.data)
    }

    /// Opens the signed download URL. No credential is attached.
    async fn fetch(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::request_failed(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::download_failed(url, status.as_u16()));
        }
        Ok(response)
    }
}

/// Streams the response body into `path`, truncating any existing file.
///
/// A partially written file is removed when streaming fails.
async fn persist(response: reqwest::Response, url: &str, path: &Path) -> Result<u64, FetchError> {
    let file = File::create(path)
        .await
        .map_err(|e| FetchError::persist_failed(path, e))?;

    let result = stream_to_file(file, response, url, path).await;
    if result.is_err() {
        debug!(path = %path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, FetchError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| FetchError::request_failed(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::persist_failed(path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| FetchError::persist_failed(path, e))?;

    Ok(bytes_written)
}
