#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use gatekit_http::HttpClient;
use httpmock::prelude::*;
use registry_lookup::{
    GeocodeError, GeocodeQuery, LookupFailure, LookupsConfig, PostalCodeError, RegistryLookups,
    TaxIdError,
};
use serde_json::json;

fn lookups(server: &MockServer, timeout_ms: u64) -> RegistryLookups {
    let client = HttpClient::builder().allow_insecure_http().build().unwrap();
    let config = LookupsConfig {
        tax_id_base_url: server.url("/api/cnpj/v1"),
        postal_code_primary_base_url: server.url("/api/cep/v1"),
        postal_code_secondary_base_url: server.url("/ws"),
        geocode_search_url: server.url("/search"),
        geocoder_user_agent: "barboo-test/1.0".to_owned(),
        timeout_ms,
    };
    RegistryLookups::new(&client, &config)
}

fn company(status: &str) -> serde_json::Value {
    json!({
        "cnpj": "11222333000181",
        "razao_social": "BARBEARIA EXEMPLO LTDA",
        "nome_fantasia": "Barbearia Exemplo",
        "descricao_situacao_cadastral": status,
    })
}

#[tokio::test]
async fn active_tax_id_is_returned() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/api/cnpj/v1/11222333000181")
            .header("accept", "application/json");
        then.status(200).json_body(company("Ativa"));
    });

    let record = lookups(&server, 2000)
        .tax_id("11.222.333/0001-81")
        .await
        .unwrap();

    m.assert();
    assert_eq!(record.tax_id, "11222333000181");
    assert_eq!(record.legal_name, "BARBEARIA EXEMPLO LTDA");
    assert_eq!(record.trade_name.as_deref(), Some("Barbearia Exemplo"));
    assert_eq!(record.status, "Ativa");
}

#[tokio::test]
async fn inactive_and_missing_tax_ids() {
    let server = MockServer::start();
    let mut closed = server.mock(|when, then| {
        when.method(GET).path("/api/cnpj/v1/11222333000181");
        then.status(200).json_body(company("BAIXADA"));
    });
    let svc = lookups(&server, 2000);

    assert_eq!(svc.tax_id("11222333000181").await, Err(TaxIdError::Inactive));
    closed.delete();

    let _missing = server.mock(|when, then| {
        when.method(GET).path("/api/cnpj/v1/11222333000181");
        then.status(404).json_body(json!({"message": "CNPJ 11222333000181 n\u{e3}o encontrado."}));
    });
    let err = svc.tax_id("11222333000181").await.unwrap_err();
    assert_eq!(err, TaxIdError::NotFound);
    assert_eq!(err.violation().field, "cnpj");
}

#[tokio::test]
async fn tax_id_registry_failure_is_unavailable() {
    let server = MockServer::start();
    let _down = server.mock(|when, then| {
        when.method(GET).path("/api/cnpj/v1/11222333000181");
        then.status(502);
    });

    assert_eq!(
        lookups(&server, 2000).tax_id("11222333000181").await,
        Err(TaxIdError::ServiceUnavailable)
    );
}

#[tokio::test]
async fn tax_id_without_fourteen_digits_never_hits_the_registry() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(company("ATIVA"));
    });
    let svc = lookups(&server, 2000);

    assert_eq!(svc.tax_id("1122233300018").await, Err(TaxIdError::NotFound));
    assert_eq!(svc.tax_id("112223330001810").await, Err(TaxIdError::NotFound));
    assert_eq!(svc.tax_id("11.222.333/0001-810").await, Err(TaxIdError::NotFound));
    assert_eq!(svc.tax_id("").await, Err(TaxIdError::NotFound));
    any.assert_calls(0);
}

#[tokio::test]
async fn primary_postal_code_provider_answers() {
    let server = MockServer::start();
    let primary = server.mock(|when, then| {
        when.method(GET).path("/api/cep/v1/01001000");
        then.status(200).json_body(json!({
            "cep": "01001000",
            "state": "SP",
            "city": "S\u{e3}o Paulo",
            "neighborhood": "S\u{e9}",
            "street": "Pra\u{e7}a da S\u{e9}",
        }));
    });
    let secondary = server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(200).json_body(json!({}));
    });

    let address = lookups(&server, 2000).postal_code("01001-000").await.unwrap();

    primary.assert();
    secondary.assert_calls(0);
    assert_eq!(address.zip_code, "01001000");
    assert_eq!(address.city, "S\u{e3}o Paulo");
    assert_eq!(address.address, "Pra\u{e7}a da S\u{e9}");
}

#[tokio::test]
async fn primary_not_found_is_authoritative() {
    let server = MockServer::start();
    let primary = server.mock(|when, then| {
        when.method(GET).path("/api/cep/v1/99999999");
        then.status(404);
    });
    let secondary = server.mock(|when, then| {
        when.method(GET).path("/ws/99999999/json/");
        then.status(200).json_body(json!({"cep": "99999-999", "uf": "SP"}));
    });

    assert_eq!(
        lookups(&server, 2000).postal_code("99999999").await,
        Err(PostalCodeError::NotFound)
    );
    primary.assert();
    secondary.assert_calls(0);
}

#[tokio::test]
async fn primary_timeout_falls_back_to_secondary() {
    let server = MockServer::start();
    let _slow_primary = server.mock(|when, then| {
        when.method(GET).path("/api/cep/v1/01310100");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .json_body(json!({"cep": "01310100"}));
    });
    let secondary = server.mock(|when, then| {
        when.method(GET).path("/ws/01310100/json/");
        then.status(200).json_body(json!({
            "cep": "01310-100",
            "uf": "SP",
            "localidade": "S\u{e3}o Paulo",
            "bairro": "Bela Vista",
            "logradouro": "Avenida Paulista",
        }));
    });

    let address = lookups(&server, 300).postal_code("01310100").await.unwrap();

    secondary.assert();
    assert_eq!(address.zip_code, "01310100");
    assert_eq!(address.neighborhood, "Bela Vista");
    assert_eq!(address.address, "Avenida Paulista");
}

#[tokio::test]
async fn secondary_error_flag_means_not_found() {
    let server = MockServer::start();
    let _primary = server.mock(|when, then| {
        when.method(GET).path("/api/cep/v1/00000000");
        then.status(500);
    });
    let _secondary = server.mock(|when, then| {
        when.method(GET).path("/ws/00000000/json/");
        then.status(200).json_body(json!({"erro": "true"}));
    });

    assert_eq!(
        lookups(&server, 2000).postal_code("00000000").await,
        Err(PostalCodeError::NotFound)
    );
}

#[tokio::test]
async fn both_postal_code_providers_down() {
    let server = MockServer::start();
    let _primary = server.mock(|when, then| {
        when.method(GET).path("/api/cep/v1/01001000");
        then.status(503);
    });
    let secondary = server.mock(|when, then| {
        when.method(GET).path("/ws/01001000/json/");
        then.status(400);
    });

    let err = lookups(&server, 2000).postal_code("01001000").await.unwrap_err();
    secondary.assert();
    assert_eq!(err, PostalCodeError::ServiceUnavailable);
    assert_eq!(err.to_problem().status.as_u16(), 422);
}

#[tokio::test]
async fn geocode_sends_encoded_query_and_user_agent() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "Avenida Paulista, 1000, S\u{e3}o Paulo, SP, Brasil, 01310100")
            .query_param("format", "json")
            .query_param("limit", "1")
            .query_param("countrycodes", "br")
            .header("user-agent", "barboo-test/1.0");
        then.status(200)
            .json_body(json!([{"lat": "-23.5649", "lon": "-46.6519", "display_name": "x"}]));
    });

    let query = GeocodeQuery {
        address: "Avenida Paulista".to_owned(),
        address_number: "1000".to_owned(),
        neighborhood: String::new(),
        city: "S\u{e3}o Paulo".to_owned(),
        state: "SP".to_owned(),
        zip_code: "01310100".to_owned(),
    };
    let coords = lookups(&server, 2000).geocode(&query).await.unwrap();

    m.assert();
    assert!((coords.latitude + 23.5649).abs() < 1e-9);
    assert!((coords.longitude + 46.6519).abs() < 1e-9);
}

#[tokio::test]
async fn geocode_negative_outcomes() {
    let server = MockServer::start();
    let query = GeocodeQuery {
        city: "Lugar Nenhum".to_owned(),
        ..GeocodeQuery::default()
    };
    let svc = lookups(&server, 2000);

    let mut empty = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(json!([]));
    });
    assert_eq!(svc.geocode(&query).await, Err(GeocodeError::NotFound));
    empty.delete();

    let mut garbled = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(json!([{"lat": "north", "lon": "-46.6"}]));
    });
    assert_eq!(svc.geocode(&query).await, Err(GeocodeError::NotFound));
    garbled.delete();

    let _down = server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(503);
    });
    let err = svc.geocode(&query).await.unwrap_err();
    assert_eq!(err, GeocodeError::ServiceUnavailable);
    assert_eq!(err.violation().field, "");
}
