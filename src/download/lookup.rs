//! Provider lookup response types.
//!
//! Decoding is object-only: a body or `data` value of any other JSON shape is
//! a decode failure. Missing or `null` fields decode as empty strings; an empty
//! `url` is rejected later as an invalid response rather than a decode failure.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

/// Body of a successful `GET /resources/{id}/download` response.
#[derive(Debug, Default)]
pub(crate) struct LookupResponse {
    pub(crate) data: ProviderLookupResult,
}

/// Signed download location returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderLookupResult {
    /// Name the provider suggests for the file; used verbatim.
    pub filename: String,
    /// Pre-signed, time-limited download URL.
    pub url: String,
}

impl<'de> Deserialize<'de> for LookupResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LookupVisitor;

        impl<'de> Visitor<'de> for LookupVisitor {
            type Value = LookupResponse;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a lookup response object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut response = LookupResponse::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "data" {
                        // `null` leaves the previous value in place.
                        if let Some(data) = map.next_value::<Option<ProviderLookupResult>>()? {
                            response.data = data;
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(response)
            }
        }

        deserializer.deserialize_map(LookupVisitor)
    }
}

impl<'de> Deserialize<'de> for ProviderLookupResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResultVisitor;

        impl<'de> Visitor<'de> for ResultVisitor {
            type Value = ProviderLookupResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a download link object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut result = ProviderLookupResult::default();
                while let Some(key) = map.next_key::<String>()? {
                    let slot = match key.as_str() {
                        "filename" => &mut result.filename,
                        "url" => &mut result.url,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                            continue;
                        }
                    };
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        *slot = value;
                    }
                }
                Ok(result)
            }
        }

        deserializer.deserialize_map(ResultVisitor)
    }
}
