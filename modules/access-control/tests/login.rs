#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::time::Duration;

use access_control::{AccountStatus, Denial};
use common::Fixture;
use gatekit_auth::TokenVerifier;

#[tokio::test]
async fn successful_login_issues_verifiable_token() {
    let fx = Fixture::new();
    fx.add_account("ana", AccountStatus::Active, false);

    let grant = fx
        .login_service()
        .login("  ANA@example.com ", "pw")
        .await
        .unwrap();
    assert_eq!(grant.account_id, "ana");
    assert_eq!(fx.tokens.verify(&grant.token).unwrap().subject_id, "ana");
}

#[tokio::test]
async fn unknown_email_and_wrong_password_look_the_same() {
    let fx = Fixture::new();
    fx.add_account("ana", AccountStatus::Active, false);
    let svc = fx.login_service();

    let unknown = svc.login("nobody@example.com", "pw").await.unwrap_err();
    let wrong = svc.login("ana@example.com", "nope").await.unwrap_err();
    assert_eq!(unknown, Denial::InvalidCredentials);
    assert_eq!(wrong, unknown);
    assert_eq!(wrong.status().as_u16(), 401);

    assert_eq!(svc.login("   ", "pw").await.unwrap_err(), Denial::InvalidCredentials);
    assert_eq!(svc.login("ana@example.com", "").await.unwrap_err(), Denial::InvalidCredentials);
}

#[tokio::test]
async fn suspended_account_cannot_log_in() {
    let fx = Fixture::new();
    fx.add_account("ana", AccountStatus::Suspended, false);

    let denial = fx
        .login_service()
        .login("ana@example.com", "pw")
        .await
        .unwrap_err();
    assert_eq!(denial, Denial::AccountSuspended);
    assert_eq!(denial.status().as_u16(), 403);
}

#[tokio::test]
async fn attempts_are_throttled_per_email() {
    let fx = Fixture::new();
    fx.add_account("ana", AccountStatus::Active, false);
    let svc = fx.login_service();

    for _ in 0..5 {
        assert_eq!(
            svc.login("ana@example.com", "wrong").await.unwrap_err(),
            Denial::InvalidCredentials
        );
    }
    // Case and whitespace variants share the same key.
    let throttled = svc.login(" Ana@Example.com", "pw").await.unwrap_err();
    assert_eq!(throttled, Denial::LoginThrottled);
    assert_eq!(throttled.status().as_u16(), 429);
    assert_eq!(throttled.code(), "TOO_MANY_ATTEMPTS");

    fx.clock.advance(Duration::from_secs(14 * 60));
    assert_eq!(
        svc.login("ana@example.com", "pw").await.unwrap_err(),
        Denial::LoginThrottled
    );

    fx.clock.advance(Duration::from_secs(2 * 60));
    assert!(svc.login("ana@example.com", "pw").await.is_ok());
}
