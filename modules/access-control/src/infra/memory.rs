use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::model::{
    Account, AccountId, AccountStatus, Membership, MembershipRole, Tenant, TenantId, TenantStatus,
};
use crate::domain::ports::{
    AccountStore, MembershipStore, PasswordVerifier, StoreError, TenantStore,
};

/// Lower-case hex SHA-256 of `input`.
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Development account record with its password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    pub id: AccountId,
    pub email: String,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub must_change_password: bool,
    /// Hex SHA-256 of the password.
    pub password_sha256: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

#[derive(Debug, Default)]
struct Records {
    accounts: HashMap<AccountId, SeedAccount>,
    tenants: HashMap<TenantId, Tenant>,
    /// Insertion order decides which OWNER membership wins.
    memberships: Vec<Membership>,
}

/// Account, membership and tenant records held in process memory.
///
/// Implements every store contract plus [`PasswordVerifier`]; never fails.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    records: RwLock<Records>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_seed(seed: &DirectorySeed) -> Self {
        let directory = Self::new();
        for account in &seed.accounts {
            directory.insert_seed_account(account.clone());
        }
        for tenant in &seed.tenants {
            directory.insert_tenant(tenant.clone());
        }
        for membership in &seed.memberships {
            directory.insert_membership(membership.clone());
        }
        tracing::debug!(
            accounts = seed.accounts.len(),
            tenants = seed.tenants.len(),
            memberships = seed.memberships.len(),
            "directory seeded"
        );
        directory
    }

    /// Insert or replace an account; the email is normalized.
    pub fn insert_account(&self, account: Account, password: &str) {
        self.insert_seed_account(SeedAccount {
            id: account.id,
            email: account.email,
            status: account.status,
            must_change_password: account.must_change_password,
            password_sha256: sha256_hex(password),
        });
    }

    fn insert_seed_account(&self, mut account: SeedAccount) {
        account.email = account.email.trim().to_lowercase();
        account.password_sha256 = account.password_sha256.to_lowercase();
        self.records
            .write()
            .accounts
            .insert(account.id.clone(), account);
    }

    pub fn insert_tenant(&self, tenant: Tenant) {
        self.records.write().tenants.insert(tenant.id.clone(), tenant);
    }

    /// Insert or replace the membership for its (account, tenant) pair.
    pub fn insert_membership(&self, membership: Membership) {
        let mut records = self.records.write();
        if let Some(existing) = records.memberships.iter_mut().find(|m| {
            m.account_id == membership.account_id && m.tenant_id == membership.tenant_id
        }) {
            *existing = membership;
        } else {
            records.memberships.push(membership);
        }
    }

    /// Returns `false` when the tenant is unknown.
    pub fn set_tenant_status(&self, tenant_id: &str, status: TenantStatus) -> bool {
        let mut records = self.records.write();
        let Some(tenant) = records.tenants.get_mut(tenant_id) else {
            return false;
        };
        tenant.status = status;
        true
    }

    /// Returns `false` when the account is unknown.
    pub fn set_account_status(&self, account_id: &str, status: AccountStatus) -> bool {
        let mut records = self.records.write();
        let Some(account) = records.accounts.get_mut(account_id) else {
            return false;
        };
        account.status = status;
        true
    }
}

fn to_account(seed: &SeedAccount) -> Account {
    Account {
        id: seed.id.clone(),
        email: seed.email.clone(),
        status: seed.status,
        must_change_password: seed.must_change_password,
    }
}

#[async_trait]
impl AccountStore for InMemoryDirectory {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.records.read().accounts.get(id).map(to_account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .records
            .read()
            .accounts
            .values()
            .find(|a| a.email == email)
            .map(to_account))
    }
}

#[async_trait]
impl MembershipStore for InMemoryDirectory {
    async fn find_by_account_and_tenant(
        &self,
        account_id: &str,
        tenant_id: &str,
    ) -> Result<Option<Membership>, StoreError> {
        Ok(self
            .records
            .read()
            .memberships
            .iter()
            .find(|m| m.account_id == account_id && m.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_owned_tenant(&self, account_id: &str) -> Result<Option<TenantId>, StoreError> {
        Ok(self
            .records
            .read()
            .memberships
            .iter()
            .find(|m| m.account_id == account_id && m.is_active && m.role == MembershipRole::Owner)
            .map(|m| m.tenant_id.clone()))
    }
}

#[async_trait]
impl TenantStore for InMemoryDirectory {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, StoreError> {
        Ok(self.records.read().tenants.get(id).cloned())
    }
}

#[async_trait]
impl PasswordVerifier for InMemoryDirectory {
    async fn verify(&self, account: &Account, password: &str) -> Result<bool, StoreError> {
        let records = self.records.read();
        let Some(stored) = records.accounts.get(&account.id) else {
            return Ok(false);
        };
        Ok(stored.password_sha256 == sha256_hex(password))
    }
}
