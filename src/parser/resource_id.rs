//! Resource identifier extraction from provider page URLs.
//!
//! Provider page URLs end in a slug such as `cute-cat_12345678.htm?query`.
//! The identifier is the text between the first underscore and the first
//! dot of the last path segment.

use tracing::trace;

/// Extracts the provider resource ID from a resource page URL.
///
/// The algorithm is purely textual and never fails:
/// 1. take the segment after the last `/`
/// 2. drop everything from the first `?`
/// 3. drop everything from the first `.`
/// 4. if an `_` remains, keep only the piece between the first and second `_`
///
/// A segment ending in `_` yields an empty ID. Slugs with several underscores
/// (`a_b_c`) keep only the second piece (`b`).
///
/// # Examples
///
/// ```
/// use freepik_dl_core::parser::extract_resource_id;
///
/// let id = extract_resource_id("https://www.freepik.com/free-photo/cat_12345.htm?from=search");
/// assert_eq!(id, "12345");
/// ```
#[must_use]
pub fn extract_resource_id(url: &str) -> String {
    let mut segment = url.rsplit('/').next().unwrap_or_default();

    if let Some((head, _)) = segment.split_once('?') {
        segment = head;
    }

    if let Some((head, _)) = segment.split_once('.') {
        segment = head;
    }

    if segment.contains('_') {
        segment = segment.split('_').nth(1).unwrap_or_default();
    }

    trace!(resource_id = segment, "extracted resource id");
    segment.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefixed_id_with_extension_and_query() {
        let url = "https://www.freepik.com/premium-vector/flat-icons_987654.htm?query=x&page=2";
        assert_eq!(extract_resource_id(url), "987654");
    }

    #[test]
    fn test_extract_plain_segment_unchanged() {
        assert_eq!(extract_resource_id("https://x.com/12345"), "12345");
    }

    #[test]
    fn test_extract_multiple_underscores_keeps_second_piece() {
        assert_eq!(extract_resource_id("https://x.com/a_b_c.jpg?x=1"), "b");
    }

    #[test]
    fn test_extract_trailing_underscore_yields_empty_id() {
        assert_eq!(extract_resource_id("https://x.com/a_.jpg"), "");
    }

    #[test]
    fn test_extract_query_stripped_before_extension() {
        // The dot lives in the query, so it must not truncate the slug.
        assert_eq!(extract_resource_id("https://x.com/img_42?ref=a.b"), "42");
    }

    #[test]
    fn test_extract_trailing_slash_yields_empty_id() {
        assert_eq!(extract_resource_id("https://x.com/photos/"), "");
    }

    #[test]
    fn test_extract_input_without_slash_uses_whole_string() {
        assert_eq!(extract_resource_id("poster_777.psd"), "777");
    }

    #[test]
    fn test_extract_empty_input() {
        assert_eq!(extract_resource_id(""), "");
    }

    #[test]
    fn test_extract_leading_underscore() {
        assert_eq!(extract_resource_id("https://x.com/_99.png"), "99");
    }
}
