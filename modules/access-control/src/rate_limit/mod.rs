//! In-memory fixed-window rate limiting.
//!
//! Each key owns one [`RateLimitEntry`]. The window is measured from the
//! last admitted request, and an exhausted key can optionally be blocked
//! for a cooldown. Entries are never evicted, so the map grows with the
//! number of distinct keys seen by the process.

mod clock;
mod limiter;
mod policy;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::RateLimiter;
pub use policy::RateLimitPolicy;
pub use store::{DashMapStore, RateLimitEntry, RateLimitStore};
