use async_trait::async_trait;
use gatekit_http::{FetchOptions, HttpClient};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::model::AddressRecord;
use crate::domain::postal_code::{PostalCodeProvider, ProviderOutcome};

#[derive(Debug, Deserialize)]
struct ViaCepAddress {
    #[serde(default)]
    uf: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    logradouro: String,
    /// Present (as `true` or `"true"`) when the code does not exist.
    #[serde(default)]
    erro: Option<Value>,
}

impl ViaCepAddress {
    fn is_missing(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Fallback provider. Answers 200 with an `erro` flag for unknown codes;
/// any transport or status failure counts as unavailable.
#[derive(Clone)]
pub struct ViaCepPostalCodes {
    client: HttpClient,
    base_url: String,
    options: FetchOptions,
}

impl ViaCepPostalCodes {
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
impl PostalCodeProvider for ViaCepPostalCodes {
    fn name(&self) -> &'static str {
        "viacep"
    }

    async fn fetch(&self, digits: &str) -> ProviderOutcome {
        let url = format!("{}/{digits}/json/", self.base_url);
        match self
            .client
            .fetch_json::<ViaCepAddress>(&url, &self.options)
            .await
        {
            Ok(found) if found.is_missing() => ProviderOutcome::NotFound,
            Ok(found) => ProviderOutcome::Found(AddressRecord {
                zip_code: digits.to_owned(),
                address: found.logradouro,
                neighborhood: found.bairro,
                city: found.localidade,
                state: found.uf,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "viacep postal code lookup failed");
                ProviderOutcome::Unavailable
            }
        }
    }
}
