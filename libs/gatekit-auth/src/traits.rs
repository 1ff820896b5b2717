use crate::claims::TokenPayload;
use crate::errors::TokenError;

/// Checks a presented bearer credential.
pub trait TokenVerifier: Send + Sync {
    /// # Errors
    /// Returns `TokenError` when the token is malformed, expired or badly signed
    fn verify(&self, token: &str) -> Result<TokenPayload, TokenError>;
}

/// Mints credentials after a successful login.
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    /// Returns `TokenError::Encode` if signing fails
    fn issue(&self, subject_id: &str) -> Result<String, TokenError>;
}
