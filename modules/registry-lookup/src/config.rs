use serde::{Deserialize, Serialize};

/// Registry endpoints and client settings.
///
/// Base URLs have no trailing slash; overriding them points the lookups at
/// mirrors or mock servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupsConfig {
    /// Tax-ID registry, queried as `{base}/{digits}`.
    pub tax_id_base_url: String,
    /// Primary postal-code registry, queried as `{base}/{digits}`.
    pub postal_code_primary_base_url: String,
    /// Fallback postal-code registry, queried as `{base}/{digits}/json/`.
    pub postal_code_secondary_base_url: String,
    /// Geocoder search endpoint.
    pub geocode_search_url: String,
    /// `User-Agent` sent to the geocoder, which requires an identifying one.
    pub geocoder_user_agent: String,
    /// Hard deadline per registry call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LookupsConfig {
    fn default() -> Self {
        Self {
            tax_id_base_url: "https://brasilapi.com.br/api/cnpj/v1".to_owned(),
            postal_code_primary_base_url: "https://brasilapi.com.br/api/cep/v1".to_owned(),
            postal_code_secondary_base_url: "https://viacep.com.br/ws".to_owned(),
            geocode_search_url: "https://nominatim.openstreetmap.org/search".to_owned(),
            geocoder_user_agent: "barboo/0.1".to_owned(),
            timeout_ms: 6000,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<LookupsConfig>(r#"{"timeout":5}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: LookupsConfig = serde_json::from_str(r#"{"timeout_ms":2500}"#).unwrap();
        assert_eq!(cfg.timeout_ms, 2500);
        assert_eq!(cfg.geocoder_user_agent, "barboo/0.1");
        assert!(cfg.tax_id_base_url.starts_with("https://"));
    }
}
