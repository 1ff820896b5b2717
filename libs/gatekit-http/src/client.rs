use std::fmt;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::uri::InvalidUri;
use http::{Request, Response, Uri};
use http_body_util::Full;
use tower::ServiceExt;
use tower::util::BoxCloneSyncService;

use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::response::ResponseBody;

pub(crate) type HttpService =
    BoxCloneSyncService<Request<Full<Bytes>>, Response<ResponseBody>, HttpError>;

/// Pooled client for registry calls.
///
/// Cheap to clone; clones share one connection pool, so hand copies to each
/// lookup instead of wrapping the client in a lock.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: HttpService,
    pub(crate) max_body_size: usize,
    pub(crate) transport: TransportSecurity,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_body_size", &self.max_body_size)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Build an empty-bodied GET for `url` carrying `headers`.
    pub(crate) fn get_request(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Request<Full<Bytes>>, HttpError> {
        let mut request = Request::get(self.checked_uri(url)?);
        for (name, value) in headers {
            request = request.header(
                HeaderName::try_from(name.as_str())?,
                HeaderValue::try_from(value.as_str())?,
            );
        }
        Ok(request.body(Full::new(Bytes::new()))?)
    }

    /// Run a request through the stack. Every HTTP status is `Ok` here.
    pub(crate) async fn send(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<Response<ResponseBody>, HttpError> {
        self.service.clone().oneshot(request).await
    }

    fn checked_uri(&self, url: &str) -> Result<Uri, HttpError> {
        let invalid = |reason: String| HttpError::InvalidUrl {
            url: url.to_owned(),
            reason,
        };

        let uri: Uri = url.parse().map_err(|e: InvalidUri| invalid(e.to_string()))?;
        if uri.host().is_none() {
            return Err(invalid("missing host".to_owned()));
        }
        match (uri.scheme_str(), self.transport) {
            (Some("https"), _) | (Some("http"), TransportSecurity::AllowInsecureHttp) => Ok(uri),
            (Some(scheme), _) => Err(HttpError::SchemeNotAllowed {
                scheme: scheme.to_owned(),
            }),
            (None, _) => Err(invalid("missing scheme".to_owned())),
        }
    }
}
