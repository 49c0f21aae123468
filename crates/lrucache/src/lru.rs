//! LRU (Least Recently Used) cache implementation
//!
//! A hash index maps each key to its node in a [`RecencyList`], giving O(1)
//! get/put/del and O(1) eviction from the tail.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use ahash::RandomState;
use tracing::{debug, trace, warn};

use crate::config::{CacheConfig, DEFAULT_CAPACITY};
use crate::error::{Error, Result};
use crate::list::{NodeRef, RecencyList};

/// Hook invoked with each evicted `(key, value)` pair
pub type EvictCallback<K, V> = Box<dyn FnMut(K, V) + Send>;

/// LRU cache with fixed capacity
///
/// Single-owner and not internally synchronized; wrap it in
/// [`SharedCache`](crate::SharedCache) to share it between threads.
pub struct LruCache<K, V> {
    map: HashMap<K, NodeRef, RandomState>,
    list: RecencyList<(K, V)>,
    capacity: usize,
    on_evict: Option<EvictCallback<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// A capacity of 0 falls back to [`DEFAULT_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!(default = DEFAULT_CAPACITY, "zero cache capacity, using default");
            DEFAULT_CAPACITY
        } else {
            capacity
        };

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::with_capacity(capacity),
            capacity,
            on_evict: None,
        }
    }

    /// Create a cache that calls `on_evict` for every entry it evicts
    pub fn with_evict<F>(capacity: usize, on_evict: F) -> Self
    where
        F: FnMut(K, V) + Send + 'static,
    {
        let mut cache = Self::new(capacity);
        cache.set_on_evict(on_evict);
        cache
    }

    /// Create a cache from a validated config
    ///
    /// Unlike [`new`](Self::new), a zero capacity here is an explicit
    /// configuration mistake and is rejected with
    /// [`Error::InvalidCapacity`] instead of falling back to the default.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity))
    }

    /// Install the eviction hook, replacing any previous one
    ///
    /// The hook runs synchronously inside `put`, `resize` and `clear`, after
    /// the entry has left the cache. It cannot reach back into the cache,
    /// which stays mutably borrowed for the duration of the call.
    pub fn set_on_evict<F>(&mut self, on_evict: F)
    where
        F: FnMut(K, V) + Send + 'static,
    {
        self.on_evict = Some(Box::new(on_evict));
    }

    /// Remove the eviction hook
    pub fn clear_on_evict(&mut self) {
        self.on_evict = None;
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let node = *self.map.get(key)?;
        self.list.move_to_front(node);
        Some(&self.list.get(node).1)
    }

    /// Insert or update a key-value pair
    ///
    /// Returns `true` if the insert pushed the least recently used entry out.
    /// Updating an existing key never evicts.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if let Some(&node) = self.map.get(&key) {
            self.list.get_mut(node).1 = value;
            self.list.move_to_front(node);
            return false;
        }

        let node = self.list.push_front((key.clone(), value));
        self.map.insert(key, node);

        // only a fresh insert can overflow, and only by one
        self.list.len() > self.capacity && self.evict_lru()
    }

    /// Remove a key from the cache, returning its value
    ///
    /// Removal is caller-initiated and does not call the eviction hook.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let node = self.map.remove(key)?;
        let (_, value) = self.list.remove(node);
        Some(value)
    }

    /// Remove a key from the cache, returning whether it was present
    pub fn del(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Check membership without touching recency
    pub fn has(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().rev().map(|(key, _)| key)
    }

    /// Entries from most to least recently used, without touching recency
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter().map(|(key, value)| (key, value))
    }

    /// Peek at the least recently used entry
    pub fn lru(&self) -> Option<(&K, &V)> {
        let (key, value) = self.list.get(self.list.tail()?);
        Some((key, value))
    }

    /// Evict every entry, calling the eviction hook for each
    ///
    /// Returns the number of entries evicted. The cache keeps its capacity
    /// and hook and can be used again.
    pub fn clear(&mut self) -> usize {
        let mut evicted = 0;
        while self.evict_lru() {
            evicted += 1;
        }

        debug!(evicted, "cleared cache");
        evicted
    }

    /// Change the capacity, evicting from the tail until the cache fits
    ///
    /// Returns the number of entries evicted. Growing never evicts and does
    /// not pre-allocate. A zero capacity is rejected before anything changes.
    pub fn resize(&mut self, capacity: usize) -> Result<usize> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        let mut evicted = 0;
        while self.list.len() > capacity && self.evict_lru() {
            evicted += 1;
        }

        debug!(from = self.capacity, to = capacity, evicted, "resized cache");
        self.capacity = capacity;
        Ok(evicted)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_lru(&mut self) -> bool {
        let Some(node) = self.list.tail() else {
            return false;
        };
        let (key, value) = self.list.remove(node);
        self.map.remove(&key);
        trace!(
            slot = node.slot(),
            remaining = self.list.len(),
            "evicted least recently used entry"
        );

        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(key, value);
        }
        true
    }

    /// Assert that the index and the list agree and fit the capacity
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        assert_eq!(self.map.len(), self.list.len(), "index and list out of step");
        assert!(
            self.list.len() <= self.capacity,
            "len({}) > capacity({})",
            self.list.len(),
            self.capacity
        );
        assert_eq!(self.list.iter().count(), self.list.len());
        assert_eq!(self.list.iter().rev().count(), self.list.len());

        for (key, _) in self.list.iter() {
            let node = self.map.get(key).copied();
            assert!(node.is_some(), "listed key missing from index");
            if let Some(node) = node {
                assert!(self.list.get(node).0 == *key, "index points at wrong node");
            }
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.list.len())
            .field("capacity", &self.capacity)
            .field("on_evict", &self.on_evict.is_some())
            .finish()
    }
}
