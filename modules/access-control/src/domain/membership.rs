use std::sync::Arc;

use super::error::Denial;
use super::internal;
use super::model::{Account, MembershipRole, TenantId};
use super::ports::MembershipStore;

/// Role held by an account inside one tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipGrant {
    pub tenant_id: TenantId,
    pub role: MembershipRole,
}

#[derive(Clone)]
pub struct MembershipAuthorizer {
    memberships: Arc<dyn MembershipStore>,
}

impl MembershipAuthorizer {
    #[must_use]
    pub fn new(memberships: Arc<dyn MembershipStore>) -> Self {
        Self { memberships }
    }

    /// Resolve the account's role in `tenant_id`, restricted to `allowed_roles`
    /// when given.
    ///
    /// A missing membership, an inactive one and a role outside the allowed
    /// set are indistinguishable to the caller.
    ///
    /// # Errors
    /// `TenantRequired` without a tenant id, `AccessDenied` as above,
    /// `Internal` when the membership store fails
    pub async fn authorize(
        &self,
        account: &Account,
        tenant_id: Option<&str>,
        allowed_roles: Option<&[MembershipRole]>,
    ) -> Result<MembershipGrant, Denial> {
        let Some(tenant_id) = tenant_id.filter(|id| !id.is_empty()) else {
            return Err(Denial::TenantRequired);
        };

        let membership = self
            .memberships
            .find_by_account_and_tenant(&account.id, tenant_id)
            .await
            .map_err(|e| internal("membership lookup", &e))?;

        let Some(membership) = membership.filter(|m| m.is_active) else {
            tracing::debug!(account_id = %account.id, tenant_id, "no active membership");
            return Err(Denial::AccessDenied);
        };

        if let Some(allowed) = allowed_roles
            && !allowed.contains(&membership.role)
        {
            tracing::debug!(
                account_id = %account.id,
                tenant_id,
                role = ?membership.role,
                "role not allowed"
            );
            return Err(Denial::AccessDenied);
        }

        Ok(MembershipGrant {
            tenant_id: membership.tenant_id,
            role: membership.role,
        })
    }

    /// Tenant owned by the account, if it holds an active OWNER membership.
    ///
    /// # Errors
    /// `Internal` when the membership store fails
    pub async fn resolve_owner_tenant(&self, account_id: &str) -> Result<Option<TenantId>, Denial> {
        self.memberships
            .find_owned_tenant(account_id)
            .await
            .map_err(|e| internal("owner tenant lookup", &e))
    }
}

impl std::fmt::Debug for MembershipAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipAuthorizer").finish_non_exhaustive()
    }
}
