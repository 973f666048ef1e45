//! Response caching for unfurl results
//!
//! TTL-based cache keyed by canonical URL so repeated previews of the same
//! shared link skip the upstream fetch.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::types::UnfurlResult;

/// A cached unfurl result with its expiry time
#[derive(Debug, Clone)]
struct CacheEntry {
    value: UnfurlResult,
    expires_at: Instant,
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub total: usize,
    pub expired: usize,
    pub max: usize,
}

/// TTL cache for unfurl results
///
/// Entries are only ever returned while unexpired; expired entries are
/// removed lazily on lookup, no background sweeper. Bounded by an entry
/// cap with oldest-expiry eviction on insert.
pub struct PreviewCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl PreviewCache {
    /// Create a cache with the given TTL and entry cap
    pub fn new(ttl_secs: u64, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
            max_entries,
        }
    }

    /// Get a cached result if present and unexpired
    pub fn get(&self, canonical_url: &str) -> Option<UnfurlResult> {
        let expired = {
            let entries = self.entries.read().ok()?;
            match entries.get(canonical_url) {
                Some(entry) if Instant::now() < entry.expires_at => {
                    return Some(entry.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        // Lazy eviction of the expired entry
        if expired {
            if let Ok(mut entries) = self.entries.write() {
                if let Some(entry) = entries.get(canonical_url) {
                    if Instant::now() >= entry.expires_at {
                        entries.remove(canonical_url);
                    }
                }
            }
        }
        None
    }

    /// Insert a result, evicting the oldest entry at capacity
    pub fn insert(&self, canonical_url: &str, value: UnfurlResult) {
        let mut entries = match self.entries.write() {
            Ok(e) => e,
            Err(_) => return,
        };

        if entries.len() >= self.max_entries && !entries.contains_key(canonical_url) {
            Self::evict_oldest(&mut entries);
        }

        entries.insert(
            canonical_url.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = match self.entries.read() {
            Ok(e) => e,
            Err(_) => {
                return CacheStats {
                    total: 0,
                    expired: 0,
                    max: self.max_entries,
                }
            }
        };

        let now = Instant::now();
        let total = entries.len();
        let expired = entries.values().filter(|e| now >= e.expires_at).count();
        CacheStats {
            total,
            expired,
            max: self.max_entries,
        }
    }

    fn evict_oldest(entries: &mut HashMap<String, CacheEntry>) {
        if let Some(oldest_key) = entries
            .iter()
            .min_by_key(|(_, e)| e.expires_at)
            .map(|(k, _)| k.clone())
        {
            entries.remove(&oldest_key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn result_for(url: &str) -> UnfurlResult {
        UnfurlResult {
            url: url.to_string(),
            title: Some("Title".to_string()),
            description: None,
            image_url: None,
            site_name: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = PreviewCache::new(300, 100);
        cache.insert("https://example.com/page", result_for("https://example.com/page"));

        let hit = cache.get("https://example.com/page").unwrap();
        assert_eq!(hit.url, "https://example.com/page");
        assert_eq!(hit.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_miss_for_unknown_key() {
        let cache = PreviewCache::new(300, 100);
        assert!(cache.get("https://example.com/other").is_none());
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = PreviewCache::new(1, 100);
        cache.insert("https://example.com/expire", result_for("https://example.com/expire"));

        assert!(cache.get("https://example.com/expire").is_some());

        sleep(Duration::from_millis(1100));

        assert!(cache.get("https://example.com/expire").is_none());
        // The expired entry was dropped on lookup
        assert_eq!(cache.stats().total, 0);
    }

    #[test]
    fn test_entry_cap_enforced() {
        let cache = PreviewCache::new(300, 3);

        for i in 0..5 {
            let url = format!("https://example.com/{}", i);
            cache.insert(&url, result_for(&url));
        }

        assert!(cache.stats().total <= 3);
    }

    #[test]
    fn test_reinsert_same_key_does_not_evict() {
        let cache = PreviewCache::new(300, 2);
        cache.insert("https://example.com/a", result_for("https://example.com/a"));
        cache.insert("https://example.com/b", result_for("https://example.com/b"));
        cache.insert("https://example.com/a", result_for("https://example.com/a"));

        assert!(cache.get("https://example.com/a").is_some());
        assert!(cache.get("https://example.com/b").is_some());
    }

    #[test]
    fn test_clear() {
        let cache = PreviewCache::new(300, 100);
        cache.insert("https://example.com/1", result_for("https://example.com/1"));
        cache.insert("https://example.com/2", result_for("https://example.com/2"));

        cache.clear();
        assert_eq!(cache.stats().total, 0);
        assert!(cache.get("https://example.com/1").is_none());
    }

    #[test]
    fn test_stats() {
        let cache = PreviewCache::new(300, 100);
        cache.insert("https://example.com/1", result_for("https://example.com/1"));
        cache.insert("https://example.com/2", result_for("https://example.com/2"));

        let stats = cache.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.expired, 0);
        assert_eq!(stats.max, 100);
    }
}
