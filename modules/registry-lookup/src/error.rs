//! Lookup failures and their outward form.
//!
//! Every failure maps to a 422 problem carrying one violation with code
//! `INTEGRATION`, tied to the input field that was looked up.

use gatekit_errors::{ErrDef, Problem, ValidationViolation};
use thiserror::Error;

pub const LOOKUP_FAILED: ErrDef = ErrDef::new(422, "Registry lookup failed", "INTEGRATION");

/// Violation code shared by all lookup failures.
pub const INTEGRATION_CODE: &str = "INTEGRATION";

/// Common outward behavior of the lookup error enums.
pub trait LookupFailure: std::error::Error {
    /// Input field the failure is reported against; empty when none applies.
    fn field(&self) -> &'static str;

    /// User-facing message (pt-BR).
    fn user_message(&self) -> &'static str;

    /// The registry could not be reached or answered unusably.
    fn is_unavailable(&self) -> bool;

    fn violation(&self) -> ValidationViolation {
        ValidationViolation::new(self.field(), self.user_message()).with_code(INTEGRATION_CODE)
    }

    fn to_problem(&self) -> Problem {
        LOOKUP_FAILED
            .as_problem(self.user_message())
            .with_violation(self.violation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TaxIdError {
    #[error("tax id not found")]
    NotFound,
    #[error("tax id registered but not active")]
    Inactive,
    #[error("tax id registry unavailable")]
    ServiceUnavailable,
}

impl LookupFailure for TaxIdError {
    fn field(&self) -> &'static str {
        "cnpj"
    }

    fn user_message(&self) -> &'static str {
        match self {
            TaxIdError::NotFound => "CNPJ n\u{e3}o encontrado.",
            TaxIdError::Inactive => "CNPJ encontrado, mas est\u{e1} inativo.",
            TaxIdError::ServiceUnavailable => {
                "Servi\u{e7}o de CNPJ indispon\u{ed}vel no momento."
            }
        }
    }

    fn is_unavailable(&self) -> bool {
        matches!(self, TaxIdError::ServiceUnavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PostalCodeError {
    #[error("postal code not found")]
    NotFound,
    #[error("postal code registries unavailable")]
    ServiceUnavailable,
}

impl LookupFailure for PostalCodeError {
    fn field(&self) -> &'static str {
        "zipCode"
    }

    fn user_message(&self) -> &'static str {
        match self {
            PostalCodeError::NotFound => "CEP n\u{e3}o encontrado.",
            PostalCodeError::ServiceUnavailable => {
                "Servi\u{e7}o de CEP indispon\u{ed}vel no momento."
            }
        }
    }

    fn is_unavailable(&self) -> bool {
        matches!(self, PostalCodeError::ServiceUnavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("address could not be geocoded")]
    NotFound,
    #[error("geocoder unavailable")]
    ServiceUnavailable,
}

impl LookupFailure for GeocodeError {
    fn field(&self) -> &'static str {
        ""
    }

    fn user_message(&self) -> &'static str {
        match self {
            GeocodeError::NotFound => {
                "N\u{e3}o foi poss\u{ed}vel geolocalizar o endere\u{e7}o informado."
            }
            GeocodeError::ServiceUnavailable => {
                "Servi\u{e7}o de geolocaliza\u{e7}\u{e3}o indispon\u{ed}vel no momento."
            }
        }
    }

    fn is_unavailable(&self) -> bool {
        matches!(self, GeocodeError::ServiceUnavailable)
    }
}
