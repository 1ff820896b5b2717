use http::HeaderMap;

const UNKNOWN_CLIENT: &str = "unknown";

/// Best-effort client address used as the generic rate-limit key.
///
/// Takes the first hop of `x-forwarded-for`, then `x-real-ip`, else `"unknown"`.
/// Both headers are client-controlled unless a trusted proxy rewrites them.
#[must_use]
pub fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_owned();
    }

    header("x-real-ip").unwrap_or(UNKNOWN_CLIENT).to_owned()
}
