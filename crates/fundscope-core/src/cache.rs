//! Time-bounded memoization for lookup stage outcomes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Time source for cache expiry, injectable so tests control the clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time; the production clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic expiry tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn start_now() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self
            .now
            .lock()
            .expect("manual clock lock should not be poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self
            .now
            .lock()
            .expect("manual clock lock should not be poisoned")
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    expires_at: Instant,
}

/// Keyed memo store with a fixed per-entry expiration window.
///
/// Entries are immutable once written and replaced wholesale when a
/// caller recomputes after expiry. There is no invalidation API and no
/// single-flight suppression; concurrent identical lookups may compute
/// redundantly.
#[derive(Clone)]
pub struct MemoCache<T: Clone> {
    entries: Arc<tokio::sync::RwLock<HashMap<String, Entry<T>>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

impl<T: Clone> MemoCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
            ttl,
            clock,
        }
    }

    /// One-hour window on the system clock.
    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL, Arc::new(SystemClock))
    }

    /// Returns the cached value unless the entry is absent or expired.
    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|entry| {
            if self.clock.now() <= entry.expires_at {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    pub async fn put(&self, key: String, value: T) {
        let expires_at = self.clock.now() + self.ttl;
        let mut entries = self.entries.write().await;
        entries.insert(key, Entry { value, expires_at });
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entry_is_returned_within_the_window() {
        let clock = ManualClock::start_now();
        let cache: MemoCache<String> = MemoCache::new(DEFAULT_TTL, Arc::new(clock.clone()));

        cache.put(String::from("0000320193"), String::from("ok")).await;
        clock.advance(Duration::from_secs(3599));

        assert_eq!(cache.get("0000320193").await, Some(String::from("ok")));
    }

    #[tokio::test]
    async fn entry_expires_after_the_window() {
        let clock = ManualClock::start_now();
        let cache: MemoCache<String> = MemoCache::new(DEFAULT_TTL, Arc::new(clock.clone()));

        cache.put(String::from("0000320193"), String::from("ok")).await;
        clock.advance(Duration::from_secs(3601));

        assert_eq!(cache.get("0000320193").await, None);
    }

    #[tokio::test]
    async fn put_replaces_an_existing_entry_wholesale() {
        let clock = ManualClock::start_now();
        let cache: MemoCache<u32> = MemoCache::new(DEFAULT_TTL, Arc::new(clock.clone()));

        cache.put(String::from("key"), 1).await;
        cache.put(String::from("key"), 2).await;

        assert_eq!(cache.get("key").await, Some(2));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn miss_on_unknown_key() {
        let cache: MemoCache<u32> = MemoCache::with_default_ttl();
        assert!(cache.get("absent").await.is_none());
        assert!(cache.is_empty().await);
    }
}
