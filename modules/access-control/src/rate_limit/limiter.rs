use std::sync::Arc;
use std::time::Instant;

use super::clock::{Clock, SystemClock};
use super::policy::RateLimitPolicy;
use super::store::{DashMapStore, RateLimitEntry, RateLimitStore};

/// Fixed-window limiter over an injectable store and clock.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("keys", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Arc::new(DashMapStore::new()), Arc::new(SystemClock))
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns `true` when the request identified by `key` is admitted.
    ///
    /// The decision and the entry update happen under one per-key lock.
    pub fn check(&self, key: &str, policy: &RateLimitPolicy) -> bool {
        let now = self.clock.now();
        let admitted = self
            .store
            .update(key, &mut |slot| decide(slot, now, policy));
        if !admitted {
            tracing::debug!(key, max_requests = policy.max_requests, "rate limit exceeded");
        }
        admitted
    }

    /// Number of keys currently tracked.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.store.len()
    }
}

fn decide(slot: &mut Option<RateLimitEntry>, now: Instant, policy: &RateLimitPolicy) -> bool {
    let Some(entry) = slot.as_mut() else {
        *slot = Some(RateLimitEntry::fresh(now));
        return true;
    };

    if let Some(until) = entry.blocked_until {
        if now < until {
            return false;
        }
        // Cooldown served: start over with a fresh window.
        *entry = RateLimitEntry::fresh(now);
        return true;
    }

    if now.saturating_duration_since(entry.last_seen) > policy.window {
        *entry = RateLimitEntry::fresh(now);
        return true;
    }

    if entry.count >= policy.max_requests {
        if !policy.block_duration.is_zero() {
            entry.blocked_until = Some(now + policy.block_duration);
        }
        return false;
    }

    entry.count += 1;
    entry.last_seen = now;
    true
}
