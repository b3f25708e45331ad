//! In-process TTL cache for aggregated provider results.
//!
//! Entries are valid while `now - stored_at < ttl` and are evicted lazily on
//! the read that finds them expired. Actix runs handlers on a multi-threaded
//! runtime, so the map sits behind a `Mutex`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

#[derive(Clone)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CacheEntry<T>>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, value: T) {
        self.lock().insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("paris||6".to_string(), vec![1, 2, 3]);
        assert_eq!(cache.get("paris||6"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_miss_after_expiry() {
        let cache = TtlCache::new(Duration::from_millis(10));
        cache.insert("paris||6".to_string(), vec![1]);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.get("paris||6"), None);
        // the expired entry is dropped on read, not left behind
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unknown_key_is_miss() {
        let cache: TtlCache<Vec<i32>> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nowhere||6"), None);
    }
}
