//! In-memory response cache with per-entry time-to-live.
//!
//! Entries are visible only while the clock reads earlier than their expiry.
//! Expired entries are treated as absent and are overwritten or swept
//! lazily. The clock is injected so that callers (and tests) control time.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use storefront_catalog::cache::{ManualClock, ResponseCache};
//!
//! let clock = Arc::new(ManualClock::default());
//! let cache: ResponseCache<String> = ResponseCache::with_clock(clock.clone(), None);
//!
//! cache.set("categories:all", "cached".to_string(), Duration::from_secs(60));
//! assert_eq!(cache.get("categories:all").as_deref(), Some("cached"));
//!
//! clock.advance(chrono::Duration::seconds(60));
//! assert_eq!(cache.get("categories:all"), None);
//! ```

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

/// A cached value and the instant it stops being visible.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry<V> {
    /// The cached payload.
    pub value: V,
    /// First instant at which the entry is treated as absent.
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    /// Returns `true` while `now` is before the expiry.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe TTL cache keyed by request key.
///
/// The default payload type is the raw JSON body of an API response. When a
/// capacity is set, inserting a new key into a full cache first sweeps
/// expired entries and then evicts the entry closest to expiry.
#[derive(Debug)]
pub struct ResponseCache<V = serde_json::Value> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
    capacity: Option<usize>,
}

// Verify ResponseCache is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResponseCache>();
};

impl<V: Clone> ResponseCache<V> {
    /// Creates a cache using the system clock.
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self::with_clock(Arc::new(SystemClock), capacity)
    }

    /// Creates a cache using the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>, capacity: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            capacity,
        }
    }

    /// Returns the stored value if present and unexpired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entries = self.lock();
        let hit = entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone());
        drop(entries);

        if hit.is_some() {
            tracing::debug!(key, "cache hit");
        } else {
            tracing::debug!(key, "cache miss");
        }
        hit
    }

    /// Stores `value` under `key` until `ttl` has elapsed, replacing any prior entry.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let now = self.clock.now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut entries = self.lock();
        if let Some(capacity) = self.capacity {
            if !entries.contains_key(&key) && entries.len() >= capacity {
                Self::make_room(&mut entries, now, capacity);
            }
        }
        entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Removes an entry, returning its value if it was still fresh.
    pub fn remove(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.lock()
            .remove(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Drops expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn make_room(
        entries: &mut HashMap<String, CacheEntry<V>>,
        now: DateTime<Utc>,
        capacity: usize,
    ) {
        entries.retain(|_, entry| entry.is_fresh(now));
        while entries.len() >= capacity {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            tracing::debug!(key = %oldest, "cache full, evicting entry closest to expiry");
            entries.remove(&oldest);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with_clock(capacity: Option<usize>) -> (Arc<ManualClock>, ResponseCache<u32>) {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::with_clock(clock.clone(), capacity);
        (clock, cache)
    }

    #[test]
    fn test_entry_is_fresh_strictly_before_expiry() {
        let now = Utc::now();
        let entry = CacheEntry {
            value: 1,
            expires_at: now,
        };
        assert!(!entry.is_fresh(now));
        assert!(entry.is_fresh(now - chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn test_get_on_empty_cache_misses() {
        let (_, cache) = cache_with_clock(None);
        assert_eq!(cache.get("missing"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_remove_returns_fresh_value_only() {
        let (clock, cache) = cache_with_clock(None);
        cache.set("a", 1, Duration::from_secs(10));
        cache.set("b", 2, Duration::from_secs(1));
        clock.advance(chrono::Duration::seconds(5));

        assert_eq!(cache.remove("a"), Some(1));
        assert_eq!(cache.remove("b"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired_counts_removed_entries() {
        let (clock, cache) = cache_with_clock(None);
        cache.set("short", 1, Duration::from_secs(1));
        cache.set("long", 2, Duration::from_secs(100));
        clock.advance(chrono::Duration::seconds(2));

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[test]
    fn test_full_cache_prefers_sweeping_expired_entries() {
        let (clock, cache) = cache_with_clock(Some(2));
        cache.set("stale", 1, Duration::from_secs(1));
        cache.set("fresh", 2, Duration::from_secs(100));
        clock.advance(chrono::Duration::seconds(5));

        cache.set("new", 3, Duration::from_secs(100));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("fresh"), Some(2));
        assert_eq!(cache.get("new"), Some(3));
    }

    #[test]
    fn test_full_cache_evicts_entry_closest_to_expiry() {
        let (_, cache) = cache_with_clock(Some(2));
        cache.set("soon", 1, Duration::from_secs(10));
        cache.set("later", 2, Duration::from_secs(100));

        cache.set("new", 3, Duration::from_secs(50));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("soon"), None);
        assert_eq!(cache.get("later"), Some(2));
        assert_eq!(cache.get("new"), Some(3));
    }

    #[test]
    fn test_overwriting_existing_key_never_evicts() {
        let (_, cache) = cache_with_clock(Some(2));
        cache.set("a", 1, Duration::from_secs(10));
        cache.set("b", 2, Duration::from_secs(10));

        cache.set("a", 10, Duration::from_secs(10));

        assert_eq!(cache.get("a"), Some(10));
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let (clock, cache) = cache_with_clock(None);
        cache.set("forever", 7, Duration::MAX);
        clock.advance(chrono::Duration::days(365 * 100));
        assert_eq!(cache.get("forever"), Some(7));
    }
}
