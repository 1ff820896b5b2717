use http::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building, sending or reading a registry request.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HttpError {
    #[error("failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL scheme '{scheme}' is not allowed for this client")]
    SchemeNotAllowed { scheme: String },

    /// The stack-level deadline fired.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(#[source] tower::BoxError),

    #[error("TLS setup failed: {0}")]
    Tls(#[source] tower::BoxError),

    #[error("response body exceeds {limit} bytes (read {actual})")]
    BodyTooLarge { limit: usize, actual: usize },

    #[error("HTTP {status}: {body_preview}")]
    HttpStatus {
        status: StatusCode,
        body_preview: String,
    },

    #[error("response is not the expected JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a JSON fetch against a third-party registry.
///
/// Non-2xx responses keep their status so callers can tell an authoritative
/// "does not exist" (404) from an outage. Everything else (timeouts, network
/// failures, undecodable bodies) carries no status.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url} did not answer within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Failed {
        url: String,
        #[source]
        source: HttpError,
    },
}

impl IntegrationError {
    /// Wrap a client error, lifting statuses and timeouts into their own variants.
    pub(crate) fn from_http(url: &str, err: HttpError) -> Self {
        match err {
            HttpError::HttpStatus { status, .. } => IntegrationError::Status {
                url: url.to_owned(),
                status,
            },
            HttpError::Timeout(timeout) => IntegrationError::Timeout {
                url: url.to_owned(),
                timeout,
            },
            source => IntegrationError::Failed {
                url: url.to_owned(),
                source,
            },
        }
    }

    /// HTTP status of the registry response, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            IntegrationError::Status { status, .. } => Some(*status),
            IntegrationError::Timeout { .. } | IntegrationError::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, IntegrationError::Timeout { .. })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            IntegrationError::Status { url, .. }
            | IntegrationError::Timeout { url, .. }
            | IntegrationError::Failed { url, .. } => url,
        }
    }
}
