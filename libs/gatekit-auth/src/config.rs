use secrecy::SecretString;
use serde::{Deserialize, Serialize, Serializer};

/// Token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret; never serialized in clear.
    #[serde(default = "empty_secret", serialize_with = "redact")]
    pub secret: SecretString,

    /// Token lifetime in seconds (default: 7 days)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,

    /// Leeway in seconds for the `exp` check
    #[serde(default)]
    pub leeway_seconds: u64,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_token_ttl() -> i64 {
    7 * 24 * 60 * 60
}

fn redact<S: Serializer>(_secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("[REDACTED]")
}

impl AuthConfig {
    #[must_use]
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            ..Self::default()
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: empty_secret(),
            token_ttl_seconds: default_token_ttl(),
            leeway_seconds: 0,
        }
    }
}
