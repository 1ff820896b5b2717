use std::sync::Arc;

use super::error::Denial;
use super::internal;
use super::model::{TenantId, TenantStatus};
use super::ports::TenantStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTenant {
    pub tenant_id: TenantId,
}

/// Blocks tenants that are suspended or not yet provisioned.
#[derive(Clone)]
pub struct TenantGate {
    tenants: Arc<dyn TenantStore>,
}

impl TenantGate {
    #[must_use]
    pub fn new(tenants: Arc<dyn TenantStore>) -> Self {
        Self { tenants }
    }

    /// `allow_setup` admits tenants still in `IN_SETUP`, for the owner's
    /// provisioning flow.
    ///
    /// # Errors
    /// `TenantNotFound`, `TenantSuspended`, `TenantInSetup`, or `Internal`
    /// when the tenant store fails
    pub async fn resolve(&self, tenant_id: &str, allow_setup: bool) -> Result<ResolvedTenant, Denial> {
        let tenant = self
            .tenants
            .find_by_id(tenant_id)
            .await
            .map_err(|e| internal("tenant lookup", &e))?
            .ok_or_else(|| {
                tracing::debug!(tenant_id, "tenant not found");
                Denial::TenantNotFound
            })?;

        match tenant.status {
            TenantStatus::Active => {}
            TenantStatus::InSetup if allow_setup => {}
            TenantStatus::InSetup => {
                tracing::debug!(tenant_id, "tenant still in setup");
                return Err(Denial::TenantInSetup);
            }
            TenantStatus::Suspended => {
                tracing::debug!(tenant_id, "tenant suspended");
                return Err(Denial::TenantSuspended);
            }
        }

        Ok(ResolvedTenant {
            tenant_id: tenant.id,
        })
    }
}

impl std::fmt::Debug for TenantGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantGate").finish_non_exhaustive()
    }
}
