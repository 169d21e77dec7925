//! Error types for the download module.
//!
//! Every fetch failure maps to exactly one [`FetchErrorKind`], so callers
//! can choose a message per kind without matching on payloads.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a provider resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No API key was configured; no request was sent.
    #[error("missing API key: set FREEPIK_API_KEY or pass --api-key")]
    MissingCredential,

    /// Network-level error reaching the provider API or the signed download URL.
    #[error("request to {url} failed: {source}")]
    RequestFailed {
        /// The URL that could not be reached.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The lookup endpoint answered with a status other than 200.
    #[error("API error for resource '{resource_id}': HTTP {status}\n{body}")]
    ApiError {
        /// Resource ID that was looked up.
        resource_id: String,
        /// The HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The lookup response body was not the expected JSON shape.
    #[error("could not decode API response for resource '{resource_id}': {source}")]
    DecodeFailed {
        /// Resource ID that was looked up.
        resource_id: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The lookup succeeded but carried no download URL.
    #[error("API did not return a valid download URL for resource '{resource_id}'")]
    InvalidResponse {
        /// Resource ID that was looked up.
        resource_id: String,
    },

    /// The signed download URL answered with a status other than 200.
    #[error("download failed with HTTP {status} from {url}")]
    DownloadFailed {
        /// The signed download URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Creating or writing the output file failed.
    #[error("could not save file to {path}: {source}")]
    PersistFailed {
        /// The output file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Fieldless discriminant of [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// No API key was configured.
    MissingCredential,
    /// A request could not be sent or its body could not be read.
    RequestFailed,
    /// The lookup returned a status other than 200.
    ApiError,
    /// The lookup body was not the expected JSON object.
    DecodeFailed,
    /// The lookup succeeded but carried no download URL.
    InvalidResponse,
    /// The signed URL returned a status other than 200.
    DownloadFailed,
    /// Writing the output file failed.
    PersistFailed,
}

impl FetchError {
    /// Creates a transport error from a reqwest error.
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::RequestFailed {
            url: url.into(),
            source,
        }
    }

    /// Creates a lookup status error.
    pub fn api_error(resource_id: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::ApiError {
            resource_id: resource_id.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a lookup decode error.
    pub fn decode_failed(resource_id: impl Into<String>, source: serde_json::Error) -> Self {
        Self::DecodeFailed {
            resource_id: resource_id.into(),
            source,
        }
    }

    /// Creates an empty-download-URL error.
    pub fn invalid_response(resource_id: impl Into<String>) -> Self {
        Self::InvalidResponse {
            resource_id: resource_id.into(),
        }
    }

    /// Creates a fetch status error.
    pub fn download_failed(url: impl Into<String>, status: u16) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            status,
        }
    }

    /// Creates a file creation/write error.
    pub fn persist_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistFailed {
            path: path.into(),
            source,
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::MissingCredential => FetchErrorKind::MissingCredential,
            Self::RequestFailed { .. } => FetchErrorKind::RequestFailed,
            Self::ApiError { .. } => FetchErrorKind::ApiError,
            Self::DecodeFailed { .. } => FetchErrorKind::DecodeFailed,
            Self::InvalidResponse { .. } => FetchErrorKind::InvalidResponse,
            Self::DownloadFailed { .. } => FetchErrorKind::DownloadFailed,
            Self::PersistFailed { .. } => FetchErrorKind::PersistFailed,
        }
    }

    /// HTTP status for the two status-bearing kinds.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } | Self::DownloadFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// No From<reqwest::Error> / From<std::io::Error>: every variant needs the url
// or path the source error does not carry.
