use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Signing secret is empty")]
    EmptySecret,

    #[error("Token encoding failed: {0}")]
    Encode(String),
}

impl TokenError {
    /// Whether the failure comes from the presented token rather than local setup.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Expired | TokenError::InvalidSignature | TokenError::Malformed(_)
        )
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}
