//! `Authorization: Bearer <token>` parsing.

use http::HeaderMap;

const BEARER_PREFIX: &str = "Bearer ";

/// Token part of an `Authorization` value, if it uses the bearer scheme.
///
/// An empty token counts as missing.
#[must_use]
pub fn parse_bearer(value: &str) -> Option<&str> {
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[must_use]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer)
}
