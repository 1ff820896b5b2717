use std::time::Duration;

/// Limits applied to one family of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Idle time after the last admitted request that resets the counter.
    pub window: Duration,
    /// Requests admitted per window.
    pub max_requests: u32,
    /// Cooldown applied when the limit is hit; zero denies without blocking.
    pub block_duration: Duration,
}

impl RateLimitPolicy {
    #[must_use]
    pub const fn new(window: Duration, max_requests: u32, block_duration: Duration) -> Self {
        Self {
            window,
            max_requests,
            block_duration,
        }
    }

    /// 5 attempts per 15 minutes, then a 15 minute block.
    #[must_use]
    pub const fn login() -> Self {
        Self::new(
            Duration::from_secs(15 * 60),
            5,
            Duration::from_secs(15 * 60),
        )
    }
}

impl Default for RateLimitPolicy {
    /// 10 requests per minute, no block.
    fn default() -> Self {
        Self::new(Duration::from_secs(60), 10, Duration::ZERO)
    }
}
