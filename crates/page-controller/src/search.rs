//! Search query handling
//!
//! Builds the redirect target for a submitted search box. The path and
//! parameter name are a contract with the server-side search endpoint.

/// Trims user input, returning `None` when nothing is left to search for
#[must_use]
pub fn normalize_query(raw: &str) -> Option<&str> {
    let query = raw.trim();
    (!query.is_empty()).then_some(query)
}

/// Builds `<path>?<param>=<percent-encoded query>` for non-empty input
///
/// Every byte outside `A-Z a-z 0-9 - _ . ~` is percent-encoded as UTF-8.
#[must_use]
pub fn search_url(path: &str, param: &str, raw: &str) -> Option<String> {
    let query = normalize_query(raw)?;
    Some(format!("{path}?{param}={}", urlencoding::encode(query)))
}
