//! SharedCache: thread-safe handle around a single LruCache

use std::hash::Hash;
use std::sync::Arc;
use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Cloneable, lock-guarded handle to one [`LruCache`]
///
/// Every method takes the lock for exactly one cache operation. The eviction
/// hook runs while the lock is held, so it must not call back into the same
/// `SharedCache`.
pub struct SharedCache<K, V> {
    /// The single-owner cache behind the lock
    cache: Arc<Mutex<LruCache<K, V>>>,

    /// Hit/miss/eviction counters
    stats: Arc<CacheStats>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared cache with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }

    /// Create a shared cache that reports evictions to `on_evict`
    pub fn with_evict<F>(capacity: usize, on_evict: F) -> Self
    where
        F: FnMut(K, V) + Send + 'static,
    {
        Self::from_cache(LruCache::with_evict(capacity, on_evict))
    }

    /// Create a shared cache from a validated config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::from_cache(LruCache::from_config(config)?))
    }

    /// Take ownership of an existing cache
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Get a copy of a value, marking it most recently used
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.cache.lock().get(key).cloned();
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Insert or update a key-value pair
    ///
    /// # Returns
    /// * `bool` - true if an entry was evicted to make room
    pub fn put(&self, key: K, value: V) -> bool {
        let mut cache = self.cache.lock();
        if !cache.has(&key) {
            self.stats.record_insert();
        }

        let evicted = cache.put(key, value);
        if evicted {
            self.stats.record_evictions(1);
        }
        evicted
    }

    /// Remove a key, returning its value
    pub fn remove(&self, key: &K) -> Option<V> {
        self.cache.lock().remove(key)
    }

    /// Remove a key, returning whether it was present
    pub fn del(&self, key: &K) -> bool {
        self.cache.lock().del(key)
    }

    /// Check membership without touching recency
    pub fn has(&self, key: &K) -> bool {
        self.cache.lock().has(key)
    }

    /// Copy of the keys, least recently used first
    pub fn keys(&self) -> Vec<K> {
        self.cache.lock().keys().cloned().collect()
    }

    /// Copy of the least recently used entry
    pub fn lru(&self) -> Option<(K, V)> {
        self.cache
            .lock()
            .lru()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Change the capacity
    ///
    /// # Returns
    /// * `Result<usize>` - Number of entries evicted
    pub fn resize(&self, capacity: usize) -> Result<usize> {
        let evicted = self.cache.lock().resize(capacity)?;
        self.stats.record_evictions(evicted as u64);
        Ok(evicted)
    }

    /// Evict every entry (statistics are kept)
    pub fn clear(&self) -> usize {
        let evicted = self.cache.lock().clear();
        self.stats.record_evictions(evicted as u64);
        evicted
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.lock().capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_basic() {
        let cache = SharedCache::new(10);

        assert!(!cache.put(1u64, b"test data".to_vec()));
        let data = cache.get(&1).unwrap();

        assert_eq!(data, b"test data");
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 0);
        assert_eq!(cache.stats().inserts(), 1);
    }

    #[test]
    fn test_shared_miss() {
        let cache: SharedCache<u64, Vec<u8>> = SharedCache::new(10);

        assert_eq!(cache.get(&7), None);
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().hit_ratio(), 0.0);
    }

    #[test]
    fn test_shared_eviction() {
        let cache = SharedCache::new(2);

        cache.put(0u64, "data 0");
        cache.put(1, "data 1");
        assert_eq!(cache.len(), 2);

        // Cache now: [1 (head), 0 (tail)]
        assert!(cache.put(2, "data 2"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lru(), Some((1, "data 1")));

        assert_eq!(cache.get(&0), None);
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_shared_update_is_not_insert() {
        let cache = SharedCache::new(2);

        cache.put("k", 1);
        cache.put("k", 2);

        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.get(&"k"), Some(2));
    }

    #[test]
    fn test_shared_delete() {
        let cache = SharedCache::new(10);

        cache.put(1u64, "a");
        cache.put(2, "b");
        assert_eq!(cache.remove(&1), Some("a"));
        assert!(cache.del(&2));
        assert!(!cache.del(&2));

        assert!(cache.is_empty());
        assert_eq!(cache.stats().evictions(), 0);
    }

    #[test]
    fn test_shared_resize_and_clear() {
        let evicted = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&evicted);
        let cache = SharedCache::with_evict(8, move |_: u32, _: u32| *counter.lock() += 1);

        for i in 0..8 {
            cache.put(i, i);
        }
        assert_eq!(cache.resize(5).unwrap(), 3);
        assert_eq!(cache.capacity(), 5);
        assert_eq!(cache.keys(), vec![3, 4, 5, 6, 7]);
        assert!(cache.resize(0).is_err());

        assert_eq!(cache.clear(), 5);
        assert_eq!(*evicted.lock(), 8);
        assert_eq!(cache.stats().evictions(), 8);
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn test_shared_from_config() {
        let config = CacheConfig::from_json(r#"{"capacity": 3}"#).unwrap();
        let cache: SharedCache<u8, u8> = SharedCache::from_config(&config).unwrap();
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = SharedCache::new(512);

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = t * 1000 + i;
                        cache.put(key, key);
                        assert_eq!(cache.get(&key), Some(key));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 400);
        assert_eq!(cache.stats().inserts(), 400);
        assert_eq!(cache.stats().evictions(), 0);
        assert_eq!(cache.stats().hits(), 400);
    }
}
