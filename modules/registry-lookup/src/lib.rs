#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Lookups against Brazilian public registries.
//!
//! - tax ID (CNPJ) through BrasilAPI, accepted only when the company is active
//! - postal code (CEP) through BrasilAPI with ViaCEP as fallback
//! - address geocoding through Nominatim
//!
//! Each lookup returns a typed result and never propagates transport errors:
//! registry failures are classified as "not found" or "service unavailable".
//! [`LookupFailure`] turns those into `422` problems with a single violation.

pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod normalize;

pub use config::LookupsConfig;
pub use domain::geocode::GeocodeLookup;
pub use domain::model::{AddressRecord, CompanyRecord, Coordinates, GeocodeQuery};
pub use domain::postal_code::{PostalCodeLookup, PostalCodeProvider, ProviderOutcome};
pub use domain::service::RegistryLookups;
pub use domain::tax_id::TaxIdLookup;
pub use error::{GeocodeError, LookupFailure, PostalCodeError, TaxIdError};
