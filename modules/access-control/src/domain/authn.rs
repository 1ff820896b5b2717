use std::sync::Arc;

use gatekit_auth::{TokenVerifier, parse_bearer};

use super::error::Denial;
use super::internal;
use super::model::Account;
use super::ports::AccountStore;

/// Turns an `Authorization` header into an active account.
#[derive(Clone)]
pub struct Authenticator {
    verifier: Arc<dyn TokenVerifier>,
    accounts: Arc<dyn AccountStore>,
}

impl Authenticator {
    #[must_use]
    pub fn new(verifier: Arc<dyn TokenVerifier>, accounts: Arc<dyn AccountStore>) -> Self {
        Self { verifier, accounts }
    }

    /// Every unauthenticated outcome (no header, bad scheme, bad or expired
    /// token, unknown subject) yields the same [`Denial::Unauthenticated`].
    ///
    /// # Errors
    /// - `Unauthenticated` as above
    /// - `AccountSuspended` for suspended accounts
    /// - `PasswordChangeRequired` when the account must set a new password first
    /// - `Internal` when the account store fails
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Account, Denial> {
        let Some(token) = authorization.and_then(parse_bearer) else {
            tracing::debug!(reason = "missing bearer credential", "authentication denied");
            return Err(Denial::Unauthenticated);
        };

        let payload = self.verifier.verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "authentication denied");
            Denial::Unauthenticated
        })?;

        let account = self
            .accounts
            .find_by_id(&payload.subject_id)
            .await
            .map_err(|e| internal("account lookup", &e))?
            .ok_or_else(|| {
                tracing::debug!(reason = "unknown subject", "authentication denied");
                Denial::Unauthenticated
            })?;

        if !account.is_active() {
            tracing::debug!(account_id = %account.id, "account suspended");
            return Err(Denial::AccountSuspended);
        }
        if account.must_change_password {
            tracing::debug!(account_id = %account.id, "password change required");
            return Err(Denial::PasswordChangeRequired);
        }
        Ok(account)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}
