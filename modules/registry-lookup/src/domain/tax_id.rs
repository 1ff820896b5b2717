use gatekit_http::{FetchOptions, HttpClient};
use serde::Deserialize;

use crate::error::TaxIdError;
use crate::normalize::{digits_only, fold_status};

use super::model::CompanyRecord;

const TAX_ID_DIGITS: usize = 14;
const ACTIVE_STATUS: &str = "ATIVA";

#[derive(Debug, Deserialize)]
struct RegistryCompany {
    razao_social: String,
    #[serde(default)]
    nome_fantasia: Option<String>,
    descricao_situacao_cadastral: String,
}

/// CNPJ lookup against the BrasilAPI company registry.
#[derive(Clone)]
pub struct TaxIdLookup {
    client: HttpClient,
    base_url: String,
    options: FetchOptions,
}

impl TaxIdLookup {
    #[must_use]
    pub fn new(client: HttpClient, base_url: impl Into<String>, options: FetchOptions) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            options,
        }
    }

    /// Look up an active company by tax ID. Punctuation in `raw` is ignored.
    ///
    /// # Errors
    /// - `NotFound` for inputs without exactly 14 digits (no request is made)
    ///   and for registry 404s
    /// - `Inactive` when the registry status is anything but `ATIVA`
    /// - `ServiceUnavailable` for every other registry failure
    pub async fn lookup(&self, raw: &str) -> Result<CompanyRecord, TaxIdError> {
        let tax_id = digits_only(raw);
        if tax_id.len() != TAX_ID_DIGITS {
            return Err(TaxIdError::NotFound);
        }

        let url = format!("{}/{tax_id}", self.base_url);
        let company: RegistryCompany = self
            .client
            .fetch_json(&url, &self.options)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    TaxIdError::NotFound
                } else {
                    tracing::warn!(error = %e, "tax id registry unavailable");
                    TaxIdError::ServiceUnavailable
                }
            })?;

        if fold_status(&company.descricao_situacao_cadastral) != ACTIVE_STATUS {
            tracing::debug!(
                tax_id,
                status = %company.descricao_situacao_cadastral,
                "tax id is not active"
            );
            return Err(TaxIdError::Inactive);
        }

        Ok(CompanyRecord {
            tax_id,
            legal_name: company.razao_social,
            trade_name: company.nome_fantasia.filter(|name| !name.trim().is_empty()),
            status: company.descricao_situacao_cadastral,
        })
    }
}

impl std::fmt::Debug for TaxIdLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxIdLookup")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
