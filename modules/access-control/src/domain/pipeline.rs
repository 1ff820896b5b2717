//! Ordered composition of the access-control stages.

use crate::rate_limit::{RateLimitPolicy, RateLimiter};

use super::authn::Authenticator;
use super::error::Denial;
use super::membership::{MembershipAuthorizer, MembershipGrant};
use super::model::{Account, MembershipRole};
use super::tenant_gate::TenantGate;

/// Tenant part of a request, for tenant-scoped operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantScope<'a> {
    /// Path or query tenant id; `None` or empty is rejected as a bad request.
    pub tenant_id: Option<&'a str>,
    /// `None` admits every role.
    pub allowed_roles: Option<&'a [MembershipRole]>,
    pub allow_setup: bool,
}

impl<'a> TenantScope<'a> {
    #[must_use]
    pub fn new(tenant_id: Option<&'a str>) -> Self {
        Self {
            tenant_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn roles(mut self, allowed: &'a [MembershipRole]) -> Self {
        self.allowed_roles = Some(allowed);
        self
    }

    #[must_use]
    pub fn allow_setup(mut self) -> Self {
        self.allow_setup = true;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// Identifying key for the rate limiter, usually the client IP.
    /// Counted under its own `ip:` namespace, apart from login attempts.
    pub rate_key: &'a str,
    /// Raw `Authorization` header value.
    pub authorization: Option<&'a str>,
    pub tenant: Option<TenantScope<'a>>,
}

/// Who is calling and, for tenant-scoped requests, in which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub account: Account,
    pub grant: Option<MembershipGrant>,
}

/// Rate limit, authenticate, then gate the tenant and check membership.
///
/// Stages run in that order and the first denial wins.
#[derive(Debug, Clone)]
pub struct RequestAuthorizationPipeline {
    limiter: RateLimiter,
    policy: RateLimitPolicy,
    authenticator: Authenticator,
    gate: TenantGate,
    memberships: MembershipAuthorizer,
}

impl RequestAuthorizationPipeline {
    #[must_use]
    pub fn new(
        limiter: RateLimiter,
        policy: RateLimitPolicy,
        authenticator: Authenticator,
        gate: TenantGate,
        memberships: MembershipAuthorizer,
    ) -> Self {
        Self {
            limiter,
            policy,
            authenticator,
            gate,
            memberships,
        }
    }

    #[must_use]
    pub fn memberships(&self) -> &MembershipAuthorizer {
        &self.memberships
    }

    /// # Errors
    /// The [`Denial`] of the first stage that rejects the request
    pub async fn authorize(&self, request: &AccessRequest<'_>) -> Result<Principal, Denial> {
        if !self.limiter.check(&format!("ip:{}", request.rate_key), &self.policy) {
            return Err(Denial::RateLimited);
        }

        let account = self.authenticator.authenticate(request.authorization).await?;

        let Some(scope) = request.tenant else {
            return Ok(Principal {
                account,
                grant: None,
            });
        };

        let Some(tenant_id) = scope.tenant_id.filter(|id| !id.is_empty()) else {
            return Err(Denial::TenantRequired);
        };

        let tenant = self.gate.resolve(tenant_id, scope.allow_setup).await?;
        let grant = self
            .memberships
            .authorize(&account, Some(tenant.tenant_id.as_str()), scope.allowed_roles)
            .await?;

        Ok(Principal {
            account,
            grant: Some(grant),
        })
    }
}
