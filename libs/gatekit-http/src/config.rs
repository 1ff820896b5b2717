use std::time::Duration;

/// `User-Agent` sent when neither the client nor the request sets one.
pub const DEFAULT_USER_AGENT: &str = concat!("gatekit-http/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportSecurity {
    #[default]
    TlsOnly,
    /// Plain `http://` is accepted too. Mock servers only.
    AllowInsecureHttp,
}

/// Settings consumed by [`HttpClientBuilder`](crate::HttpClientBuilder).
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Deadline for a request inside the stack (default 6 s).
    pub request_timeout: Duration,
    /// Largest decoded body accepted, in bytes (default 1 MiB).
    pub max_body_size: usize,
    pub user_agent: String,
    pub transport: TransportSecurity,
    /// `0` hands 3xx responses back untouched.
    pub max_redirects: usize,
    pub pool_idle_timeout: Option<Duration>,
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(6),
            max_body_size: 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
            max_redirects: 3,
            pool_idle_timeout: Some(Duration::from_secs(60)),
            pool_max_idle_per_host: 4,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_tls_only_with_six_second_deadline() {
        let config = HttpClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_millis(6000));
        assert_eq!(config.transport, TransportSecurity::TlsOnly);
        assert!(config.user_agent.starts_with("gatekit-http/"));
    }
}
