use std::sync::Arc;

use access_control::infra::InMemoryDirectory;
use access_control::rate_limit::{RateLimitPolicy, RateLimiter};
use access_control::{
    Authenticator, LoginService, MembershipAuthorizer, RequestAuthorizationPipeline, TenantGate,
};
use anyhow::{Context, Result};
use gatekit_auth::HmacTokenService;
use gatekit_http::HttpClient;
use registry_lookup::RegistryLookups;

use crate::config::AppConfig;

/// Everything the handlers need, shared across requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: RequestAuthorizationPipeline,
    pub login: LoginService,
    pub lookups: RegistryLookups,
}

impl AppState {
    /// # Errors
    /// Fails when the auth secret is empty or the HTTP client cannot be built
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let lookups =
            RegistryLookups::from_config(&config.lookups).context("failed to build HTTP client")?;
        Self::with_lookups(config, lookups)
    }

    /// Same as [`AppState::from_config`] with registry calls going through `client`.
    ///
    /// # Errors
    /// Fails when the auth secret is empty
    pub fn with_http_client(config: &AppConfig, client: &HttpClient) -> Result<Self> {
        Self::with_lookups(config, RegistryLookups::new(client, &config.lookups))
    }

    fn with_lookups(config: &AppConfig, lookups: RegistryLookups) -> Result<Self> {
        let tokens = Arc::new(
            HmacTokenService::new(&config.auth).context("auth.secret must be configured")?,
        );
        let directory = Arc::new(InMemoryDirectory::from_seed(&config.access.directory));
        // `login:` and `ip:` key namespaces keep the two policies apart in one store.
        let limiter = RateLimiter::default();

        let pipeline = RequestAuthorizationPipeline::new(
            limiter.clone(),
            RateLimitPolicy::from(config.access.rate_limits.requests),
            Authenticator::new(tokens.clone(), directory.clone()),
            TenantGate::new(directory.clone()),
            MembershipAuthorizer::new(directory.clone()),
        );
        let login = LoginService::new(
            directory.clone(),
            directory,
            tokens,
            limiter,
            RateLimitPolicy::from(config.access.rate_limits.login),
        );

        Ok(Self {
            pipeline,
            login,
            lookups,
        })
    }
}
