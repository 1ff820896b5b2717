//! Postal-code lookup over an ordered chain of providers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PostalCodeError;
use crate::normalize::digits_only;

use super::model::AddressRecord;

const POSTAL_CODE_DIGITS: usize = 8;

/// What one provider concluded about a postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Found(AddressRecord),
    /// Authoritative negative; the chain stops here.
    NotFound,
    /// The provider failed; the next one is tried.
    Unavailable,
}

#[async_trait]
pub trait PostalCodeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// `digits` is always exactly eight ASCII digits.
    async fn fetch(&self, digits: &str) -> ProviderOutcome;
}

#[derive(Clone)]
pub struct PostalCodeLookup {
    providers: Vec<Arc<dyn PostalCodeProvider>>,
}

impl PostalCodeLookup {
    /// Providers are consulted in the given order.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn PostalCodeProvider>>) -> Self {
        Self { providers }
    }

    /// Resolve a CEP. Punctuation in `raw` is ignored.
    ///
    /// # Errors
    /// - `NotFound` for inputs without exactly 8 digits (no request is made)
    ///   or when a provider reports the code as nonexistent
    /// - `ServiceUnavailable` when every provider failed
    pub async fn lookup(&self, raw: &str) -> Result<AddressRecord, PostalCodeError> {
        let digits = digits_only(raw);
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(PostalCodeError::NotFound);
        }

        for provider in &self.providers {
            match provider.fetch(&digits).await {
                ProviderOutcome::Found(address) => return Ok(address),
                ProviderOutcome::NotFound => return Err(PostalCodeError::NotFound),
                ProviderOutcome::Unavailable => {
                    tracing::warn!(provider = provider.name(), "postal code provider failed, trying next");
                }
            }
        }
        Err(PostalCodeError::ServiceUnavailable)
    }
}

impl std::fmt::Debug for PostalCodeLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("PostalCodeLookup")
            .field("providers", &names)
            .finish()
    }
}
