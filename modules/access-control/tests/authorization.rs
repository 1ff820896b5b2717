#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use access_control::rate_limit::RateLimitPolicy;
use access_control::{
    AccessRequest, AccountStatus, Denial, MembershipAuthorizer, MembershipRole, TenantGate,
    TenantScope, TenantStatus,
};
use common::{Fixture, UnavailableTenants};
use gatekit_auth::{AuthConfig, HmacTokenService};
use time::{Duration, OffsetDateTime};

const OWNER_ONLY: &[MembershipRole] = &[MembershipRole::Owner];

fn generous() -> RateLimitPolicy {
    RateLimitPolicy::new(std::time::Duration::from_secs(60), 1000, std::time::Duration::ZERO)
}

#[tokio::test]
async fn unauthenticated_outcomes_are_indistinguishable() {
    let fx = Fixture::new();
    fx.add_account("ana", AccountStatus::Active, false);
    let authn = fx.authenticator();

    let expired = HmacTokenService::new(&AuthConfig::with_secret(common::SECRET))
        .unwrap()
        .issue_at("ana", OffsetDateTime::now_utc() - Duration::days(8))
        .unwrap();
    let foreign = HmacTokenService::new(&AuthConfig::with_secret("other-secret"))
        .unwrap()
        .issue_at("ana", OffsetDateTime::now_utc())
        .unwrap();
    let unknown_subject = fx.bearer("ghost");

    let cases = [
        None,
        Some("Basic abc".to_owned()),
        Some("Bearer not-a-jwt".to_owned()),
        Some(format!("Bearer {expired}")),
        Some(format!("Bearer {foreign}")),
        Some(unknown_subject),
    ];

    for header in cases {
        let denial = authn.authenticate(header.as_deref()).await.unwrap_err();
        assert_eq!(denial, Denial::Unauthenticated);
        assert_eq!(denial.status().as_u16(), 401);
        assert_eq!(denial.message(), Denial::Unauthenticated.message());
    }
}

#[tokio::test]
async fn account_status_gates_authentication() {
    let fx = Fixture::new();
    fx.add_account("active", AccountStatus::Active, false);
    fx.add_account("suspended", AccountStatus::Suspended, false);
    fx.add_account("fresh", AccountStatus::Active, true);
    let authn = fx.authenticator();

    let ok = authn.authenticate(Some(&fx.bearer("active"))).await.unwrap();
    assert_eq!(ok.id, "active");

    let suspended = authn
        .authenticate(Some(&fx.bearer("suspended")))
        .await
        .unwrap_err();
    assert_eq!(suspended, Denial::AccountSuspended);
    assert_eq!(suspended.status().as_u16(), 403);

    let fresh = authn.authenticate(Some(&fx.bearer("fresh"))).await.unwrap_err();
    assert_eq!(fresh, Denial::PasswordChangeRequired);
    assert_eq!(fresh.status().as_u16(), 403);
    assert_ne!(fresh.code(), suspended.code());
}

#[tokio::test]
async fn membership_denials_are_indistinguishable() {
    let fx = Fixture::new();
    fx.add_account("barber", AccountStatus::Active, false);
    fx.add_account("former", AccountStatus::Active, false);
    fx.add_account("stranger", AccountStatus::Active, false);
    fx.add_membership("barber", "shop", MembershipRole::Barber, true);
    fx.add_membership("former", "shop", MembershipRole::Owner, false);
    let authz = MembershipAuthorizer::new(fx.directory.clone());
    let authn = fx.authenticator();

    let mut denials = Vec::new();
    for (who, roles) in [
        ("barber", Some(OWNER_ONLY)),
        ("former", None),
        ("stranger", None),
    ] {
        let account = authn.authenticate(Some(&fx.bearer(who))).await.unwrap();
        denials.push(authz.authorize(&account, Some("shop"), roles).await.unwrap_err());
    }

    for denial in denials {
        assert_eq!(denial, Denial::AccessDenied);
        assert_eq!(denial.status().as_u16(), 403);
    }

    let account = authn.authenticate(Some(&fx.bearer("barber"))).await.unwrap();
    let grant = authz.authorize(&account, Some("shop"), None).await.unwrap();
    assert_eq!(grant.role, MembershipRole::Barber);
    assert_eq!(grant.tenant_id, "shop");

    let missing = authz.authorize(&account, None, None).await.unwrap_err();
    assert_eq!(missing, Denial::TenantRequired);
    assert_eq!(missing.status().as_u16(), 400);
}

#[tokio::test]
async fn tenant_gate_follows_lifecycle() {
    let fx = Fixture::new();
    fx.add_tenant("live", TenantStatus::Active);
    fx.add_tenant("closed", TenantStatus::Suspended);
    fx.add_tenant("new", TenantStatus::InSetup);
    let gate = TenantGate::new(fx.directory.clone());

    assert_eq!(gate.resolve("live", false).await.unwrap().tenant_id, "live");
    assert_eq!(gate.resolve("missing", false).await.unwrap_err(), Denial::TenantNotFound);
    assert_eq!(gate.resolve("closed", true).await.unwrap_err(), Denial::TenantSuspended);

    let in_setup = gate.resolve("new", false).await.unwrap_err();
    assert_eq!(in_setup, Denial::TenantInSetup);
    assert_eq!(in_setup.code(), "BARBERSHOP_IN_SETUP");
    assert_eq!(gate.resolve("new", true).await.unwrap().tenant_id, "new");
}

#[tokio::test]
async fn store_failure_becomes_internal_error() {
    let gate = TenantGate::new(Arc::new(UnavailableTenants));
    let denial = gate.resolve("any", false).await.unwrap_err();
    assert_eq!(denial, Denial::Internal);
    assert_eq!(denial.status().as_u16(), 500);
}

#[tokio::test]
async fn pipeline_grants_tenant_scoped_access() {
    let fx = Fixture::new();
    fx.add_account("owner", AccountStatus::Active, false);
    fx.add_tenant("shop", TenantStatus::InSetup);
    fx.add_membership("owner", "shop", MembershipRole::Owner, true);
    let pipeline = fx.pipeline(generous());
    let bearer = fx.bearer("owner");

    let denied = pipeline
        .authorize(&AccessRequest {
            rate_key: "10.0.0.1",
            authorization: Some(&bearer),
            tenant: Some(TenantScope::new(Some("shop"))),
        })
        .await
        .unwrap_err();
    assert_eq!(denied, Denial::TenantInSetup);

    let principal = pipeline
        .authorize(&AccessRequest {
            rate_key: "10.0.0.1",
            authorization: Some(&bearer),
            tenant: Some(TenantScope::new(Some("shop")).roles(OWNER_ONLY).allow_setup()),
        })
        .await
        .unwrap();
    assert_eq!(principal.account.id, "owner");
    let grant = principal.grant.unwrap();
    assert_eq!(grant.role, MembershipRole::Owner);
    assert_eq!(grant.tenant_id, "shop");
}

#[tokio::test]
async fn pipeline_rate_limits_before_authentication() {
    let fx = Fixture::new();
    let pipeline = fx.pipeline(RateLimitPolicy::new(
        std::time::Duration::from_secs(60),
        1,
        std::time::Duration::ZERO,
    ));
    let request = AccessRequest {
        rate_key: "10.0.0.9",
        authorization: None,
        tenant: None,
    };

    assert_eq!(pipeline.authorize(&request).await.unwrap_err(), Denial::Unauthenticated);
    let second = pipeline.authorize(&request).await.unwrap_err();
    assert_eq!(second, Denial::RateLimited);
    assert_eq!(second.status().as_u16(), 429);
    assert!(second.is_retryable());

    fx.clock.advance(std::time::Duration::from_secs(61));
    assert_eq!(pipeline.authorize(&request).await.unwrap_err(), Denial::Unauthenticated);
}

#[tokio::test]
async fn pipeline_checks_tenant_before_membership() {
    let fx = Fixture::new();
    fx.add_account("stranger", AccountStatus::Active, false);
    fx.add_tenant("closed", TenantStatus::Suspended);
    let pipeline = fx.pipeline(generous());
    let bearer = fx.bearer("stranger");

    let request = |tenant_id| AccessRequest {
        rate_key: "10.0.0.2",
        authorization: Some(&bearer),
        tenant: Some(TenantScope::new(tenant_id)),
    };

    assert_eq!(
        pipeline.authorize(&request(Some("closed"))).await.unwrap_err(),
        Denial::TenantSuspended
    );
    assert_eq!(
        pipeline.authorize(&request(Some("nowhere"))).await.unwrap_err(),
        Denial::TenantNotFound
    );
    assert_eq!(
        pipeline.authorize(&request(None)).await.unwrap_err(),
        Denial::TenantRequired
    );
    assert_eq!(
        pipeline.authorize(&request(Some(""))).await.unwrap_err(),
        Denial::TenantRequired
    );
}

#[tokio::test]
async fn client_keys_cannot_drain_login_attempts() {
    let fx = Fixture::new();
    fx.add_account("ana", AccountStatus::Active, false);
    let pipeline = fx.pipeline(generous());
    let login = fx.login_service();

    let forged = AccessRequest {
        rate_key: "login:ana@example.com",
        authorization: None,
        tenant: None,
    };
    for _ in 0..6 {
        assert_eq!(pipeline.authorize(&forged).await.unwrap_err(), Denial::Unauthenticated);
    }

    let grant = login.login("ana@example.com", "pw").await.unwrap();
    assert!(!grant.token.is_empty());
}
