//! A small TTL cache for store-backed configuration lookups.
//!
//! Keyed by a logical resource name, storing `(value, fetched_at)`. The
//! clock is injected so tests can advance time deterministically instead of
//! sleeping.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Time source for [`TtlCache`].
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Wall-clock time. The default outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Slot {
    value: String,
    fetched_at: Instant,
}

/// Explicit cache with per-entry expiry and an `invalidate` escape hatch.
///
/// Entries older than the TTL are treated as absent; the caller refetches
/// and re-inserts. There is no background eviction; stale slots are simply
/// overwritten on the next `put`.
pub struct TtlCache<C: Clock = SystemClock> {
    ttl: Duration,
    clock: C,
    slots: RwLock<HashMap<String, Slot>>,
}

impl TtlCache<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> TtlCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, or `None` if absent or older than the TTL.
    pub async fn get(&self, key: &str) -> Option<String> {
        let slots = self.slots.read().await;
        let slot = slots.get(key)?;
        if self.clock.now().duration_since(slot.fetched_at) >= self.ttl {
            return None;
        }
        Some(slot.value.clone())
    }

    pub async fn put(&self, key: &str, value: String) {
        let fetched_at = self.clock.now();
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), Slot { value, fetched_at });
    }

    /// Drop `key` immediately, forcing the next `get` to miss.
    pub async fn invalidate(&self, key: &str) {
        let mut slots = self.slots.write().await;
        slots.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Test clock advanced by hand.
    struct ManualClock(Mutex<Instant>);

    impl ManualClock {
        fn new() -> Self {
            Self(Mutex::new(Instant::now()))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for &'static ManualClock {
        fn now(&self) -> Instant {
            *self.0.lock().expect("clock lock")
        }
    }

    fn leak_clock() -> &'static ManualClock {
        Box::leak(Box::new(ManualClock::new()))
    }

    #[tokio::test]
    async fn hit_within_ttl_miss_after() {
        let clock = leak_clock();
        let cache = TtlCache::with_clock(Duration::from_secs(60), clock);

        cache.put("report_timezone", "Asia/Seoul".to_string()).await;
        assert_eq!(
            cache.get("report_timezone").await.as_deref(),
            Some("Asia/Seoul")
        );

        clock.advance(Duration::from_secs(59));
        assert!(cache.get("report_timezone").await.is_some());

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get("report_timezone").await, None);
    }

    #[tokio::test]
    async fn invalidate_forces_a_miss() {
        let clock = leak_clock();
        let cache = TtlCache::with_clock(Duration::from_secs(60), clock);

        cache.put("report_timezone", "Asia/Seoul".to_string()).await;
        cache.invalidate("report_timezone").await;
        assert_eq!(cache.get("report_timezone").await, None);
    }

    #[tokio::test]
    async fn unknown_key_is_a_miss() {
        let cache = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nope").await, None);
    }
}
