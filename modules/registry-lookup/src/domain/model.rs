use serde::{Deserialize, Serialize};

/// Company registration found for a tax ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// 14 digits, no punctuation.
    pub tax_id: String,
    pub legal_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_name: Option<String>,
    /// Registry status label as published (always `ATIVA` once folded).
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    /// 8 digits, no punctuation.
    pub zip_code: String,
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Address parts to geocode; empty parts are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeocodeQuery {
    pub address: String,
    pub address_number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl GeocodeQuery {
    /// Free-text search: the non-empty parts, with the country inserted
    /// before the postal code, joined by `", "`.
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            self.address.as_str(),
            self.address_number.as_str(),
            self.neighborhood.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            "Brasil",
            self.zip_code.as_str(),
        ]
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn search_text_skips_empty_parts() {
        let query = GeocodeQuery {
            address: "Av. Paulista".to_owned(),
            address_number: "1000".to_owned(),
            neighborhood: String::new(),
            city: "S\u{e3}o Paulo".to_owned(),
            state: " SP ".to_owned(),
            zip_code: "01310100".to_owned(),
        };
        assert_eq!(
            query.search_text(),
            "Av. Paulista, 1000, S\u{e3}o Paulo, SP, Brasil, 01310100"
        );
        assert_eq!(GeocodeQuery::default().search_text(), "Brasil");
    }

    #[test]
    fn records_serialize_in_camel_case() {
        let record = CompanyRecord {
            tax_id: "11222333000181".to_owned(),
            legal_name: "Barbearia Exemplo LTDA".to_owned(),
            trade_name: None,
            status: "ATIVA".to_owned(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["taxId"], "11222333000181");
        assert_eq!(json["legalName"], "Barbearia Exemplo LTDA");
        assert!(json.get("tradeName").is_none());
    }
}
