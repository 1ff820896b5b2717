use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infra::DirectorySeed;
use crate::rate_limit::RateLimitPolicy;

/// Access-control settings as they appear in the server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessControlConfig {
    #[serde(default)]
    pub rate_limits: RateLimitsConfig,

    /// Records loaded into the in-memory directory at startup.
    #[serde(default)]
    pub directory: DirectorySeed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitsConfig {
    /// Applied per normalized email on login.
    #[serde(default = "login_policy")]
    pub login: RateLimitPolicyConfig,

    /// Applied per client IP on every protected request.
    #[serde(default)]
    pub requests: RateLimitPolicyConfig,
}

impl Default for RateLimitsConfig {
    fn default() -> Self {
        Self {
            login: login_policy(),
            requests: RateLimitPolicyConfig::default(),
        }
    }
}

fn login_policy() -> RateLimitPolicyConfig {
    RateLimitPolicyConfig::from(RateLimitPolicy::login())
}

/// Millisecond form of [`RateLimitPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicyConfig {
    pub window_ms: u64,
    pub max_requests: u32,
    /// Zero denies over-limit requests without a cooldown.
    #[serde(default)]
    pub block_duration_ms: u64,
}

impl Default for RateLimitPolicyConfig {
    fn default() -> Self {
        Self::from(RateLimitPolicy::default())
    }
}

impl From<RateLimitPolicy> for RateLimitPolicyConfig {
    fn from(policy: RateLimitPolicy) -> Self {
        Self {
            window_ms: millis(policy.window),
            max_requests: policy.max_requests,
            block_duration_ms: millis(policy.block_duration),
        }
    }
}

impl From<RateLimitPolicyConfig> for RateLimitPolicy {
    fn from(cfg: RateLimitPolicyConfig) -> Self {
        Self::new(
            Duration::from_millis(cfg.window_ms),
            cfg.max_requests,
            Duration::from_millis(cfg.block_duration_ms),
        )
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
