use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::{HeaderName, Request};
use axum::routing::{get, post};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::state::AppState;

/// Header carrying the per-request id; kept from the caller when present.
#[must_use]
pub fn request_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

#[must_use]
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/auth/login", post(handlers::login))
        .route("/lookups/tax-id/{value}", get(handlers::lookup_tax_id))
        .route("/lookups/postal-code/{value}", get(handlers::lookup_postal_code))
        .route("/lookups/geocode", post(handlers::geocode))
        .route("/barbershops/{id}/access", get(handlers::barbershop_access))
        .route(
            "/barbershops/{id}/setup-access",
            get(handlers::barbershop_setup_access),
        )
        .route("/me/barbershop", get(handlers::owned_barbershop))
        .layer(Extension(Arc::new(state)));

    // Layers added last run first: the id is set before the span opens.
    routes
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            let request_id = req
                .headers()
                .get(request_id_header())
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                path = %req.uri().path(),
                request_id = %request_id,
            )
        }))
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
}
