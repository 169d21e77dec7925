//! URL extraction from free-form chat text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Regex pattern for finding URLs in text.
/// Matches http:// and https:// URLs, capturing until whitespace or common delimiters.
#[allow(clippy::expect_used)]
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Static pattern, safe to panic
    Regex::new(r#"https?://[^\s<>"'\]]+"#).expect("URL regex is valid")
});

/// Returns the first HTTP/HTTPS URL found in `text`, with trailing sentence
/// punctuation removed.
///
/// # Examples
///
/// ```
/// use freepik_dl_core::parser::first_url;
///
/// let url = first_url("grab this: https://www.freepik.com/free-photo/cat_123.htm, thanks");
/// assert_eq!(url, Some("https://www.freepik.com/free-photo/cat_123.htm"));
/// ```
#[must_use]
pub fn first_url(text: &str) -> Option<&str> {
    let found = URL_PATTERN.find(text)?;
    let cleaned = clean_url_trailing(found.as_str());
    trace!(url = cleaned, "found URL candidate");
    Some(cleaned)
}

/// Cleans trailing punctuation that often gets captured with URLs.
fn clean_url_trailing(url: &str) -> &str {
    let mut result = url;

    while let Some(last) = result.chars().last() {
        match last {
            '.' | ',' | ';' | ':' | '!' | '?' => {
                result = &result[..result.len() - 1];
            }
            // Closing parens at end are usually not part of URL, unless balanced
            ')' => {
                let open_count = result.chars().filter(|&c| c == '(').count();
                let close_count = result.chars().filter(|&c| c == ')').count();
                if close_count > open_count {
                    result = &result[..result.len() - 1];
                } else {
                    break;
                }
            }
            _ => break,
        }
    }

    result
}
