use std::sync::Arc;
use std::time::Duration;

use gatekit_http::{FetchOptions, HttpClient, HttpError};

use crate::config::LookupsConfig;
use crate::error::{GeocodeError, PostalCodeError, TaxIdError};
use crate::infra::{BrasilApiPostalCodes, ViaCepPostalCodes};

use super::geocode::GeocodeLookup;
use super::model::{AddressRecord, CompanyRecord, Coordinates, GeocodeQuery};
use super::postal_code::{PostalCodeLookup, PostalCodeProvider};
use super::tax_id::TaxIdLookup;

/// The three registry lookups behind one handle.
///
/// Results are never cached; every call reaches the registries.
#[derive(Debug, Clone)]
pub struct RegistryLookups {
    tax_id: TaxIdLookup,
    postal_code: PostalCodeLookup,
    geocode: GeocodeLookup,
}

impl RegistryLookups {
    /// Build the lookups over a shared client.
    #[must_use]
    pub fn new(client: &HttpClient, config: &LookupsConfig) -> Self {
        let options = FetchOptions::default().with_timeout(Duration::from_millis(config.timeout_ms));

        let providers: Vec<Arc<dyn PostalCodeProvider>> = vec![
            Arc::new(BrasilApiPostalCodes::new(
                client.clone(),
                &config.postal_code_primary_base_url,
                options.clone(),
            )),
            Arc::new(ViaCepPostalCodes::new(
                client.clone(),
                &config.postal_code_secondary_base_url,
                options.clone(),
            )),
        ];

        Self {
            tax_id: TaxIdLookup::new(client.clone(), &config.tax_id_base_url, options.clone()),
            postal_code: PostalCodeLookup::new(providers),
            geocode: GeocodeLookup::new(
                client.clone(),
                &config.geocode_search_url,
                options.with_header("user-agent", &config.geocoder_user_agent),
            ),
        }
    }

    /// Build a dedicated client and the lookups over it.
    ///
    /// # Errors
    /// Returns `HttpError` if the HTTP client cannot be initialized
    pub fn from_config(config: &LookupsConfig) -> Result<Self, HttpError> {
        let client = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self::new(&client, config))
    }

    /// # Errors
    /// See [`TaxIdLookup::lookup`]
    pub async fn tax_id(&self, raw: &str) -> Result<CompanyRecord, TaxIdError> {
        self.tax_id.lookup(raw).await
    }

    /// # Errors
    /// See [`PostalCodeLookup::lookup`]
    pub async fn postal_code(&self, raw: &str) -> Result<AddressRecord, PostalCodeError> {
        self.postal_code.lookup(raw).await
    }

    /// # Errors
    /// See [`GeocodeLookup::lookup`]
    pub async fn geocode(&self, query: &GeocodeQuery) -> Result<Coordinates, GeocodeError> {
        self.geocode.lookup(query).await
    }
}
