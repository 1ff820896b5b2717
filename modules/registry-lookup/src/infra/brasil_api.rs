use async_trait::async_trait;
use gatekit_http::{FetchOptions, HttpClient};
use serde::Deserialize;

use crate::domain::model::AddressRecord;
use crate::domain::postal_code::{PostalCodeProvider, ProviderOutcome};

#[derive(Debug, Deserialize)]
struct BrasilApiAddress {
    #[serde(default)]
    state: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    street: String,
}

/// Primary provider. A 404 is authoritative; other failures fall through.
#[derive(Clone)]
pub struct BrasilApiPostalCodes {
    client: HttpClient,
    base_url: String,
    options: FetchOptions,
}

impl BrasilApiPostalCodes {
    #[must_use]
    pub fn new(client: HttpClient, base_url: impl Into<String>, options: FetchOptions) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            options,
        }
    }
}

#[async_trait]
impl PostalCodeProvider for BrasilApiPostalCodes {
    fn name(&self) -> &'static str {
        "brasilapi"
    }

    async fn fetch(&self, digits: &str) -> ProviderOutcome {
        let url = format!("{}/{digits}", self.base_url);
        match self
            .client
            .fetch_json::<BrasilApiAddress>(&url, &self.options)
            .await
        {
            Ok(found) => ProviderOutcome::Found(AddressRecord {
                zip_code: digits.to_owned(),
                address: found.street,
                neighborhood: found.neighborhood,
                city: found.city,
                state: found.state,
            }),
            Err(e) if e.is_not_found() => ProviderOutcome::NotFound,
            Err(e) => {
                tracing::debug!(error = %e, "brasilapi postal code lookup failed");
                ProviderOutcome::Unavailable
            }
        }
    }
}
