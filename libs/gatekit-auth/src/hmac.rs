use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use time::{Duration, OffsetDateTime};

use crate::claims::{TokenClaims, TokenPayload};
use crate::config::AuthConfig;
use crate::errors::TokenError;
use crate::traits::{TokenIssuer, TokenVerifier};

/// HS256 issuer and verifier over one shared secret.
#[derive(Clone)]
pub struct HmacTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for HmacTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl HmacTokenService {
    /// # Errors
    /// Returns `TokenError::EmptySecret` when no secret is configured
    pub fn new(config: &AuthConfig) -> Result<Self, TokenError> {
        let secret = config.secret.expose_secret();
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::seconds(config.token_ttl_seconds),
        })
    }

    /// Issue a token as of `now`.
    ///
    /// # Errors
    /// Returns `TokenError::Encode` if signing fails
    pub fn issue_at(&self, subject_id: &str, now: OffsetDateTime) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: subject_id.to_owned(),
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }
}

impl TokenIssuer for HmacTokenService {
    fn issue(&self, subject_id: &str) -> Result<String, TokenError> {
        self.issue_at(subject_id, OffsetDateTime::now_utc())
    }
}

impl TokenVerifier for HmacTokenService {
    fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding, &self.validation)?;
        TokenPayload::try_from(data.claims)
    }
}
