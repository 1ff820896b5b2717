//! JSON fetches against third-party registries.

use std::time::Duration;

use http::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;

use crate::client::HttpClient;
use crate::error::{HttpError, IntegrationError};
use crate::response::decode_json;

/// Per-call deadline used when [`FetchOptions::timeout`] is unset.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(6000);

const APPLICATION_JSON: &str = "application/json";

/// Per-call options for [`HttpClient::fetch_json`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Extra request headers. An `Accept` here replaces the JSON default.
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl HttpClient {
    /// GET `url` and decode a 2xx JSON body.
    ///
    /// The request and the body read share one deadline; when it fires the
    /// exchange is dropped, which aborts the transfer.
    ///
    /// # Errors
    ///
    /// - `IntegrationError::Status` for non-2xx responses
    /// - `IntegrationError::Timeout` when the deadline expires
    /// - `IntegrationError::Failed` for transport, TLS, size or decoding failures
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<T, IntegrationError> {
        let timeout = options.timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT);

        let exchange = async {
            let mut request = self.get_request(url, &options.headers)?;
            if !request.headers().contains_key(ACCEPT) {
                request
                    .headers_mut()
                    .insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
            }
            let response = self.send(request).await?;
            decode_json::<T>(response, self.max_body_size).await
        };

        let Ok(outcome) = tokio::time::timeout(timeout, exchange).await else {
            tracing::debug!(url, timeout_ms = timeout.as_millis(), "registry fetch timed out");
            return Err(IntegrationError::Timeout {
                url: url.to_owned(),
                timeout,
            });
        };

        outcome.map_err(|err: HttpError| {
            let err = IntegrationError::from_http(url, err);
            tracing::debug!(url, status = ?err.status(), error = %err, "registry fetch failed");
            err
        })
    }
}
