//! Expiring key/value cache for upstream exposure data.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A small TTL cache with lazy expiry.
///
/// Entries carry an absolute deadline computed at insert time; expiry is
/// checked on read and stale entries are removed then, with no background
/// sweep. The key set in practice is tiny and fixed, so no eviction policy
/// exists beyond expiry.
///
/// The internal lock is held only across map operations, never across a
/// network call; concurrent writes to the same key are last-write-wins.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a value under `key` for `ttl` from now.
    pub fn set(&self, key: &str, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
    }

    /// Returns the value for `key` if it has not expired.
    ///
    /// An expired entry is removed on the way out.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Drops every entry. Called when the upstream base URL changes so no
    /// stale data survives the switch.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
