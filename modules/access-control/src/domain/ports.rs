//! Contracts for the record store and password checks.
//!
//! Implementations return `Ok(None)` for missing rows and reserve
//! `StoreError` for failures of the store itself.

use async_trait::async_trait;
use thiserror::Error;

use super::model::{Account, Membership, Tenant, TenantId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// # Errors
    /// `StoreError` when the store cannot be read
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError>;

    /// `email` is already normalized (trimmed, lower-cased).
    ///
    /// # Errors
    /// `StoreError` when the store cannot be read
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}

#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// # Errors
    /// `StoreError` when the store cannot be read
    async fn find_by_account_and_tenant(
        &self,
        account_id: &str,
        tenant_id: &str,
    ) -> Result<Option<Membership>, StoreError>;

    /// Tenant of the account's active OWNER membership, if any.
    ///
    /// # Errors
    /// `StoreError` when the store cannot be read
    async fn find_owned_tenant(&self, account_id: &str) -> Result<Option<TenantId>, StoreError>;
}

#[async_trait]
pub trait TenantStore: Send + Sync {
    /// # Errors
    /// `StoreError` when the store cannot be read
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, StoreError>;
}

/// Compares a presented password with the account's stored hash.
#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    /// # Errors
    /// `StoreError` when the stored hash cannot be read
    async fn verify(&self, account: &Account, password: &str) -> Result<bool, StoreError>;
}
