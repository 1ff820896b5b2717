//! Denials and lookup failures rendered as problem responses.

use access_control::Denial;
use access_control::domain::error::BAD_REQUEST;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, Uri};
use gatekit_errors::{Problem, finalize};
use registry_lookup::LookupFailure;

use super::routes::request_id_header;

pub type ApiResult<T> = Result<T, Problem>;

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(request_id_header())
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Problem for `denial`, tagged with the request path and id.
pub fn deny(denial: Denial, uri: &Uri, headers: &HeaderMap) -> Problem {
    finalize(denial.to_problem(), uri.path(), request_id(headers))
}

pub fn lookup_failed(failure: &impl LookupFailure, uri: &Uri, headers: &HeaderMap) -> Problem {
    finalize(failure.to_problem(), uri.path(), request_id(headers))
}

/// 400 for a request body that could not be read as JSON.
pub fn bad_body(rejection: &JsonRejection, uri: &Uri, headers: &HeaderMap) -> Problem {
    finalize(
        BAD_REQUEST.as_problem(rejection.body_text()),
        uri.path(),
        request_id(headers),
    )
}
