//! Error values shared across the barbergate workspace.
//!
//! Outward errors are declared once as [`ErrDef`] catalog constants and
//! rendered as RFC 9457 [`Problem`] bodies. With the `axum` feature a
//! `Problem` can be returned straight from a handler.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};

/// Stamp a problem with the request path and, when known, the request id.
pub fn finalize(problem: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    let problem = problem.with_instance(instance);
    match trace_id {
        Some(id) => problem.with_trace_id(id),
        None => problem,
    }
}
