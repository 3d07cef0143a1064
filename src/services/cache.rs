use dashmap::DashMap;
use parking_lot::RwLock;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            stored_at: now,
            expires_at: now + ttl,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// A thread-safe keyed cache with TTL support.
pub struct TtlCache<V> {
    data: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a new cache where every entry lives for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    /// Get a fresh value; expired entries are evicted on read.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.is_fresh(Instant::now()) {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    /// Store a value, replacing any previous one.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.data.insert(key.into(), CacheEntry::new(value, self.ttl));
    }

    /// Remove all expired entries.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.is_fresh(now));
    }

    /// Number of entries, including ones not yet purged.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A single process-wide value with a time-to-live.
///
/// Readers check freshness and refresh on a miss. Two callers may refresh
/// at the same time; the last write wins.
pub struct TtlSlot<V> {
    entry: RwLock<Option<CacheEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> TtlSlot<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
        }
    }

    /// Get the value and how long ago it was stored.
    pub fn get_with_age(&self) -> Option<(V, Duration)> {
        let now = Instant::now();
        let guard = self.entry.read();
        let entry = guard.as_ref()?;
        if entry.is_fresh(now) {
            Some((entry.value.clone(), now.duration_since(entry.stored_at)))
        } else {
            None
        }
    }

    pub fn set(&self, value: V) {
        *self.entry.write() = Some(CacheEntry::new(value, self.ttl));
    }
}
