use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::TokenError;

/// Wire claims carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id
    pub sub: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Verified token contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub subject_id: String,
    pub issued_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl TryFrom<TokenClaims> for TokenPayload {
    type Error = TokenError;

    fn try_from(claims: TokenClaims) -> Result<Self, Self::Error> {
        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_owned()));
        }
        let issued_at = OffsetDateTime::from_unix_timestamp(claims.iat)
            .map_err(|e| TokenError::Malformed(format!("iat: {e}")))?;
        let expires_at = OffsetDateTime::from_unix_timestamp(claims.exp)
            .map_err(|e| TokenError::Malformed(format!("exp: {e}")))?;
        Ok(Self {
            subject_id: claims.sub,
            issued_at,
            expires_at,
        })
    }
}
