use std::sync::Arc;

use gatekit_auth::TokenIssuer;

use crate::rate_limit::{RateLimitPolicy, RateLimiter};

use super::error::Denial;
use super::internal;
use super::model::AccountId;
use super::ports::{AccountStore, PasswordVerifier};

#[derive(Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub account_id: AccountId,
}

impl std::fmt::Debug for LoginGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginGrant")
            .field("token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Exchanges email and password for a bearer token.
#[derive(Clone)]
pub struct LoginService {
    accounts: Arc<dyn AccountStore>,
    passwords: Arc<dyn PasswordVerifier>,
    issuer: Arc<dyn TokenIssuer>,
    limiter: RateLimiter,
    policy: RateLimitPolicy,
}

impl LoginService {
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        passwords: Arc<dyn PasswordVerifier>,
        issuer: Arc<dyn TokenIssuer>,
        limiter: RateLimiter,
        policy: RateLimitPolicy,
    ) -> Self {
        Self {
            accounts,
            passwords,
            issuer,
            limiter,
            policy,
        }
    }

    /// Attempts are limited per normalized email. An unknown email and a wrong
    /// password produce the same denial.
    ///
    /// # Errors
    /// `InvalidCredentials`, `LoginThrottled`, `AccountSuspended`, or
    /// `Internal` when a collaborator fails
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, Denial> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(Denial::InvalidCredentials);
        }

        if !self.limiter.check(&format!("login:{email}"), &self.policy) {
            return Err(Denial::LoginThrottled);
        }

        let Some(account) = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(|e| internal("account lookup", &e))?
        else {
            tracing::debug!(reason = "unknown email", "login denied");
            return Err(Denial::InvalidCredentials);
        };

        if !account.is_active() {
            tracing::debug!(account_id = %account.id, "login denied for suspended account");
            return Err(Denial::AccountSuspended);
        }

        let valid = self
            .passwords
            .verify(&account, password)
            .await
            .map_err(|e| internal("password check", &e))?;
        if !valid {
            tracing::debug!(account_id = %account.id, reason = "wrong password", "login denied");
            return Err(Denial::InvalidCredentials);
        }

        let token = self.issuer.issue(&account.id).map_err(|e| {
            tracing::error!(error = %e, "token issuing failed");
            Denial::Internal
        })?;

        tracing::info!(account_id = %account.id, "login succeeded");
        Ok(LoginGrant {
            token,
            account_id: account.id,
        })
    }
}

impl std::fmt::Debug for LoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Trimmed and lower-cased.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
