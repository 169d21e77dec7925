//! Constants for the download module (provider endpoint, timeouts).

/// Default base URL of the provider API.
pub const DEFAULT_API_BASE: &str = "https://api.freepik.com/v1";

/// Header carrying the API key on lookup requests.
pub const API_KEY_HEADER: &str = "x-freepik-api-key";

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP request timeout (5 minutes for large files).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Accepted range for configured timeouts, in seconds.
pub const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=3600;
