use gatekit_http::{FetchOptions, HttpClient};
use serde::Deserialize;
use serde_json::Value;

use crate::error::GeocodeError;

use super::model::{Coordinates, GeocodeQuery};

#[derive(Debug, Deserialize)]
struct Place {
    lat: Value,
    lon: Value,
}

/// Nominatim publishes coordinates as strings; plain numbers are accepted too.
fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Free-text address search restricted to Brazil.
#[derive(Clone)]
pub struct GeocodeLookup {
    client: HttpClient,
    search_url: String,
    options: FetchOptions,
}

impl GeocodeLookup {
    /// `options` should carry the identifying `User-Agent` the geocoder requires.
    #[must_use]
    pub fn new(client: HttpClient, search_url: impl Into<String>, options: FetchOptions) -> Self {
        Self {
            client,
            search_url: search_url.into(),
            options,
        }
    }

    /// Coordinates of the best match for `query`.
    ///
    /// # Errors
    /// - `NotFound` when there is no match or its coordinates are not numeric
    /// - `ServiceUnavailable` for any geocoder failure
    pub async fn lookup(&self, query: &GeocodeQuery) -> Result<Coordinates, GeocodeError> {
        let url = format!(
            "{}?q={}&format=json&limit=1&countrycodes=br",
            self.search_url,
            urlencoding::encode(&query.search_text())
        );

        let places: Vec<Place> = self
            .client
            .fetch_json(&url, &self.options)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "geocoder unavailable");
                GeocodeError::ServiceUnavailable
            })?;

        let Some(first) = places.first() else {
            tracing::debug!("geocoder returned no match");
            return Err(GeocodeError::NotFound);
        };

        match (coordinate(&first.lat), coordinate(&first.lon)) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(GeocodeError::NotFound),
        }
    }
}

impl std::fmt::Debug for GeocodeLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeLookup")
            .field("search_url", &self.search_url)
            .finish_non_exhaustive()
    }
}
