#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Access control for barbershop (tenant) resources.
//!
//! Every protected operation passes the same ordered stages:
//!
//! 1. rate limiting on an identifying key ([`rate_limit::RateLimiter`])
//! 2. bearer authentication and account gating ([`Authenticator`])
//! 3. for tenant-scoped operations, tenant lifecycle gating ([`TenantGate`])
//!    followed by membership and role checks ([`MembershipAuthorizer`])
//!
//! [`RequestAuthorizationPipeline`] composes the stages; [`LoginService`]
//! runs the credential exchange that produces bearer tokens.
//!
//! Account, membership and tenant records are read through the narrow store
//! traits in [`domain::ports`] on every call. [`infra::InMemoryDirectory`]
//! implements them for development and tests.

pub mod config;
pub mod domain;
pub mod infra;
pub mod rate_limit;

pub use config::{AccessControlConfig, RateLimitPolicyConfig, RateLimitsConfig};
pub use domain::authn::Authenticator;
pub use domain::client_ip::client_ip;
pub use domain::error::Denial;
pub use domain::login::{LoginGrant, LoginService};
pub use domain::membership::{MembershipAuthorizer, MembershipGrant};
pub use domain::model::{
    Account, AccountId, AccountStatus, Membership, MembershipRole, Tenant, TenantId, TenantStatus,
};
pub use domain::pipeline::{AccessRequest, Principal, RequestAuthorizationPipeline, TenantScope};
pub use domain::ports::{AccountStore, MembershipStore, PasswordVerifier, StoreError, TenantStore};
pub use domain::tenant_gate::{ResolvedTenant, TenantGate};
