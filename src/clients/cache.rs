//! In-process GET response cache for the Haven API SDK.
//!
//! The cache stores raw response bytes keyed by path plus sorted query
//! parameters, bounded in time by the configured TTL. Entries are evicted
//! lazily: a read checks expiry and treats expired entries as absent; there
//! is no background sweeper.
//!
//! Only GET requests are cache-eligible, and only when the TTL is
//! non-zero. Writes happen exclusively for 2xx responses about to be
//! returned to the caller.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct CacheEntry {
    bytes: Vec<u8>,
    expires_at: Instant,
}

/// A time-bounded cache of raw GET response bodies.
///
/// All access goes through one mutex; lookups and inserts are O(1) map
/// operations with no I/O or decoding inside the critical section, so a
/// write always fully precedes any read that observes it.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Creates a cache with the given TTL. A zero TTL disables the cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` if caching is enabled (TTL is non-zero).
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Looks up a fresh entry, removing it if it has expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        if !self.is_enabled() {
            return None;
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.bytes.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores response bytes under `key`, expiring after the TTL.
    pub fn put(&self, key: &str, bytes: &[u8]) {
        if !self.is_enabled() {
            return;
        }
        let entry = CacheEntry {
            bytes: bytes.to_vec(),
            expires_at: Instant::now() + self.ttl,
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }
}

// Verify ResponseCache is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResponseCache>();
};

/// Derives the cache key for a request: the path, followed by the query
/// parameters sorted by name and percent-encoded.
///
/// Sorting makes the key independent of query-map iteration order, so two
/// logically identical requests always share an entry.
#[must_use]
pub(crate) fn cache_key(path: &str, query: Option<&HashMap<String, String>>) -> String {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return path.to_string();
    };

    let mut pairs: Vec<(&String, &String)> = query.iter().collect();
    pairs.sort_by_key(|(name, _)| name.as_str());

    let encoded: Vec<String> = pairs
        .into_iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect();

    format!("{path}?{}", encoded.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache_never_stores() {
        let cache = ResponseCache::new(Duration::ZERO);
        assert!(!cache.is_enabled());

        cache.put("reports", b"data");
        assert!(cache.get("reports").is_none());
    }

    #[test]
    fn test_put_then_get_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("reports", b"data");
        assert_eq!(cache.get("reports"), Some(b"data".to_vec()));
    }

    #[test]
    fn test_expired_entries_are_treated_as_absent() {
        let cache = ResponseCache::new(Duration::from_millis(10));
        cache.put("reports", b"data");

        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.get("reports").is_none());
        // The expired entry is also physically gone
        assert!(cache
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty());
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("usage", b"old");
        cache.put("usage", b"new");
        assert_eq!(cache.get("usage"), Some(b"new".to_vec()));
    }

    #[test]
    fn test_cache_key_without_query_is_the_path() {
        assert_eq!(cache_key("usage", None), "usage");

        let empty = HashMap::new();
        assert_eq!(cache_key("usage", Some(&empty)), "usage");
    }

    #[test]
    fn test_cache_key_sorts_query_parameters() {
        let mut query = HashMap::new();
        query.insert("page".to_string(), "2".to_string());
        query.insert("category".to_string(), "bullying".to_string());

        assert_eq!(
            cache_key("reports", Some(&query)),
            "reports?category=bullying&page=2"
        );
    }

    #[test]
    fn test_cache_key_percent_encodes_values() {
        let mut query = HashMap::new();
        query.insert("q".to_string(), "a b&c".to_string());

        assert_eq!(cache_key("reports", Some(&query)), "reports?q=a%20b%26c");
    }
}
