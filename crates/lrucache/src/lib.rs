//! # lrucache
//!
//! Bounded LRU cache with O(1) get/put/del and observable eviction.
//!
//! ## Architecture
//! - **RecencyList**: slab-backed doubly-linked list, head = most recent (O(1))
//! - **Index**: AHash map from key to list node (O(1))
//! - **SharedCache**: optional lock-guarded handle for use across threads
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::with_evict(2, |key, value| {
//!     println!("evicted {key} => {value}");
//! });
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! assert!(cache.put("c", 3)); // evicts "b"
//! assert!(!cache.has(&"b"));
//! assert_eq!(cache.lru(), Some((&"a", &1)));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod list;
mod lru;
mod shared;
mod stats;

pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use list::{NodeRef, RecencyList};
pub use lru::{EvictCallback, LruCache};
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsSnapshot};
