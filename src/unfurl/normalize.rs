//! URL normalization and validation
//!
//! Canonicalizes caller-supplied URLs before any network activity.

use url::Url;

use super::types::UnfurlError;

/// Parse and canonicalize a user-supplied URL.
///
/// Only absolute http/https URLs are accepted. The canonical form used as
/// the cache key is the parsed URL's string form: lowercased scheme and
/// host, default ports elided, percent-encoding normalized.
///
/// Pure function of the input; performs no I/O.
pub fn normalize_url(raw: &str) -> Result<Url, UnfurlError> {
    let parsed = Url::parse(raw.trim()).map_err(|e| UnfurlError::InvalidUrl {
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(UnfurlError::DisallowedScheme {
            scheme: other.to_string(),
        }),
    }
}
