#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Bearer credentials signed with a single shared secret.
//!
//! - [`HmacTokenService`] issues and verifies HS256 tokens whose subject is an account id
//! - [`extract_bearer_token`] pulls the credential out of an `Authorization` header
//!
//! There is no key rotation, issuer or audience handling: every token is
//! checked against the one configured secret.

pub mod bearer;
pub mod claims;
pub mod config;
pub mod errors;
pub mod hmac;
pub mod traits;

pub use bearer::{extract_bearer_token, parse_bearer};
pub use claims::{TokenClaims, TokenPayload};
pub use config::AuthConfig;
pub use errors::TokenError;
pub use hmac::HmacTokenService;
pub use traits::{TokenIssuer, TokenVerifier};
