//! Route handlers. Every protected handler runs the authorization pipeline
//! before doing anything else.

use std::sync::Arc;

use access_control::{
    AccessRequest, Denial, MembershipGrant, MembershipRole, Principal, TenantScope, client_ip,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::{HeaderMap, Uri, header};
use registry_lookup::{AddressRecord, CompanyRecord, Coordinates, GeocodeQuery};

use super::dto::{BarbershopAccessDto, LoginRequest, LoginResponse, OwnedBarbershopDto};
use super::error::{ApiResult, bad_body, deny, lookup_failed};
use crate::state::AppState;

const OWNER_ONLY: &[MembershipRole] = &[MembershipRole::Owner];

async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    uri: &Uri,
    tenant: Option<TenantScope<'_>>,
) -> ApiResult<Principal> {
    let rate_key = client_ip(headers);
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    state
        .pipeline
        .authorize(&AccessRequest {
            rate_key: &rate_key,
            authorization,
            tenant,
        })
        .await
        .map_err(|denial| deny(denial, uri, headers))
}

fn access_dto(
    grant: Option<MembershipGrant>,
    uri: &Uri,
    headers: &HeaderMap,
) -> ApiResult<Json<BarbershopAccessDto>> {
    let grant = grant.ok_or_else(|| deny(Denial::Internal, uri, headers))?;
    Ok(Json(BarbershopAccessDto {
        tenant_id: grant.tenant_id,
        role: grant.role,
    }))
}

/// POST /auth/login
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Ok(Json(req)) = body else {
        return Err(deny(Denial::InvalidCredentials, &uri, &headers));
    };

    let grant = state
        .login
        .login(&req.email, &req.password)
        .await
        .map_err(|denial| deny(denial, &uri, &headers))?;

    Ok(Json(LoginResponse { token: grant.token }))
}

/// GET /lookups/tax-id/{value}
pub async fn lookup_tax_id(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    Path(value): Path<String>,
) -> ApiResult<Json<CompanyRecord>> {
    authorize(&state, &headers, &uri, None).await?;
    state
        .lookups
        .tax_id(&value)
        .await
        .map(Json)
        .map_err(|e| lookup_failed(&e, &uri, &headers))
}

/// GET /lookups/postal-code/{value}
pub async fn lookup_postal_code(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    Path(value): Path<String>,
) -> ApiResult<Json<AddressRecord>> {
    authorize(&state, &headers, &uri, None).await?;
    state
        .lookups
        .postal_code(&value)
        .await
        .map(Json)
        .map_err(|e| lookup_failed(&e, &uri, &headers))
}

/// POST /lookups/geocode
pub async fn geocode(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    body: Result<Json<GeocodeQuery>, JsonRejection>,
) -> ApiResult<Json<Coordinates>> {
    authorize(&state, &headers, &uri, None).await?;
    let Json(query) = body.map_err(|rejection| bad_body(&rejection, &uri, &headers))?;
    state
        .lookups
        .geocode(&query)
        .await
        .map(Json)
        .map_err(|e| lookup_failed(&e, &uri, &headers))
}

/// GET /barbershops/{id}/access
///
/// Any active member of an active barbershop.
pub async fn barbershop_access(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    Path(id): Path<String>,
) -> ApiResult<Json<BarbershopAccessDto>> {
    let scope = TenantScope::new(Some(id.as_str()));
    let principal = authorize(&state, &headers, &uri, Some(scope)).await?;
    access_dto(principal.grant, &uri, &headers)
}

/// GET /barbershops/{id}/setup-access
///
/// Owners only; barbershops still in setup are admitted.
pub async fn barbershop_setup_access(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    Path(id): Path<String>,
) -> ApiResult<Json<BarbershopAccessDto>> {
    let scope = TenantScope::new(Some(id.as_str())).roles(OWNER_ONLY).allow_setup();
    let principal = authorize(&state, &headers, &uri, Some(scope)).await?;
    access_dto(principal.grant, &uri, &headers)
}

/// GET /me/barbershop
pub async fn owned_barbershop(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> ApiResult<Json<OwnedBarbershopDto>> {
    let principal = authorize(&state, &headers, &uri, None).await?;
    let tenant_id = state
        .pipeline
        .memberships()
        .resolve_owner_tenant(&principal.account.id)
        .await
        .map_err(|denial| deny(denial, &uri, &headers))?
        .ok_or_else(|| deny(Denial::TenantNotFound, &uri, &headers))?;

    Ok(Json(OwnedBarbershopDto { tenant_id }))
}
