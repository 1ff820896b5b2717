use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::Instant;

/// Per-key limiter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    /// Refreshed on every admitted request.
    pub last_seen: Instant,
    /// Strictly in the future when set.
    pub blocked_until: Option<Instant>,
}

impl RateLimitEntry {
    #[must_use]
    pub fn fresh(now: Instant) -> Self {
        Self {
            count: 1,
            last_seen: now,
            blocked_until: None,
        }
    }
}

/// Storage for limiter entries.
///
/// `update` must run `f` while holding exclusive access to the key, so that
/// the read-decide-write of one check cannot interleave with another check
/// on the same key. Leaving `None` in the slot removes the entry.
pub trait RateLimitStore: Send + Sync {
    fn update(&self, key: &str, f: &mut dyn FnMut(&mut Option<RateLimitEntry>) -> bool) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sharded store; distinct keys on distinct shards never contend.
#[derive(Debug, Default)]
pub struct DashMapStore {
    map: DashMap<String, RateLimitEntry>,
}

impl DashMapStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.map.get(key).map(|e| *e)
    }
}

impl RateLimitStore for DashMapStore {
    fn update(&self, key: &str, f: &mut dyn FnMut(&mut Option<RateLimitEntry>) -> bool) -> bool {
        // The entry guard holds the shard write lock for the whole closure.
        match self.map.entry(key.to_owned()) {
            Entry::Occupied(mut occupied) => {
                let mut slot = Some(*occupied.get());
                let admitted = f(&mut slot);
                match slot {
                    Some(entry) => *occupied.get_mut() = entry,
                    None => {
                        occupied.remove();
                    }
                }
                admitted
            }
            Entry::Vacant(vacant) => {
                let mut slot = None;
                let admitted = f(&mut slot);
                if let Some(entry) = slot {
                    vacant.insert(entry);
                }
                admitted
            }
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
