//! Shared User-Agent string for provider and bot HTTP clients.

/// Tool identifier sent ahead of the crate version.
const PRODUCT: &str = "freepik-dl";

/// Default User-Agent for all outbound requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (resource-bridge)")
}
