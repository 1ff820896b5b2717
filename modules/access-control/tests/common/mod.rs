#![allow(dead_code)]

use std::sync::Arc;

use access_control::domain::ports::{StoreError, TenantStore};
use access_control::infra::InMemoryDirectory;
use access_control::rate_limit::{DashMapStore, ManualClock, RateLimitPolicy, RateLimiter};
use access_control::{
    Account, AccountStatus, Authenticator, LoginService, Membership, MembershipAuthorizer,
    MembershipRole, RequestAuthorizationPipeline, Tenant, TenantGate, TenantStatus,
};
use async_trait::async_trait;
use gatekit_auth::{AuthConfig, HmacTokenService, TokenIssuer};

pub const SECRET: &str = "integration-secret";

pub struct Fixture {
    pub directory: Arc<InMemoryDirectory>,
    pub tokens: Arc<HmacTokenService>,
    pub clock: ManualClock,
    pub limiter: RateLimiter,
}

impl Fixture {
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let tokens = Arc::new(HmacTokenService::new(&AuthConfig::with_secret(SECRET)).unwrap());
        let clock = ManualClock::default();
        let limiter = RateLimiter::new(Arc::new(DashMapStore::new()), Arc::new(clock.clone()));
        Self {
            directory,
            tokens,
            clock,
            limiter,
        }
    }

    pub fn add_account(&self, id: &str, status: AccountStatus, must_change_password: bool) {
        self.directory.insert_account(
            Account {
                id: id.to_owned(),
                email: format!("{id}@example.com"),
                status,
                must_change_password,
            },
            "pw",
        );
    }

    pub fn add_tenant(&self, id: &str, status: TenantStatus) {
        self.directory.insert_tenant(Tenant {
            id: id.to_owned(),
            status,
        });
    }

    pub fn add_membership(&self, account: &str, tenant: &str, role: MembershipRole, active: bool) {
        self.directory.insert_membership(Membership {
            account_id: account.to_owned(),
            tenant_id: tenant.to_owned(),
            role,
            is_active: active,
        });
    }

    pub fn bearer(&self, subject: &str) -> String {
        format!("Bearer {}", self.tokens.issue(subject).unwrap())
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.tokens.clone(), self.directory.clone())
    }

    pub fn pipeline(&self, policy: RateLimitPolicy) -> RequestAuthorizationPipeline {
        RequestAuthorizationPipeline::new(
            self.limiter.clone(),
            policy,
            self.authenticator(),
            TenantGate::new(self.directory.clone()),
            MembershipAuthorizer::new(self.directory.clone()),
        )
    }

    pub fn login_service(&self) -> LoginService {
        LoginService::new(
            self.directory.clone(),
            self.directory.clone(),
            self.tokens.clone(),
            self.limiter.clone(),
            RateLimitPolicy::login(),
        )
    }
}

/// Tenant store whose backend is always down.
pub struct UnavailableTenants;

#[async_trait]
impl TenantStore for UnavailableTenants {
    async fn find_by_id(&self, _id: &str) -> Result<Option<Tenant>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_owned()))
    }
}
