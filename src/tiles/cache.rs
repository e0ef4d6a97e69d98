use crate::core::geo::TileCoord;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Encoded tile bytes shared between the cache and its readers
pub type TileBytes = Arc<Vec<u8>>;

/// Thread-safe in-memory LRU cache of encoded tiles.
///
/// Clones share the same storage. A poisoned lock behaves like an empty cache.
#[derive(Debug, Clone)]
pub struct TileCache {
    cache: Arc<Mutex<LruCache<TileCoord, TileBytes>>>,
}

impl TileCache {
    /// Create a cache holding at most `capacity` tiles (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<TileCoord, TileBytes>>> {
        self.cache.lock().ok()
    }

    /// Looks a tile up and marks it as recently used
    pub fn get(&self, coord: &TileCoord) -> Option<TileBytes> {
        self.lock()?.get(coord).cloned()
    }

    pub fn insert(&self, coord: TileCoord, data: Vec<u8>) {
        if let Some(mut cache) = self.lock() {
            cache.put(coord, Arc::new(data));
        }
    }

    /// Checks presence without touching the recency order
    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.lock().map_or(false, |cache| cache.contains(coord))
    }

    pub fn clear(&self) {
        if let Some(mut cache) = self.lock() {
            cache.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().map_or(0, |cache| cache.cap().get())
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new(512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_cache_basic_operations() {
        let cache = TileCache::new(2);
        let coord = TileCoord::new(1, 2, 3);

        assert!(cache.is_empty());
        cache.insert(coord, vec![1, 2, 3]);
        assert!(cache.contains(&coord));
        assert_eq!(*cache.get(&coord).unwrap(), vec![1, 2, 3]);

        let shared = cache.clone();
        assert_eq!(shared.len(), 1);

        cache.clear();
        assert!(shared.is_empty());
    }

    #[test]
    fn test_least_recently_used_tile_is_evicted() {
        let cache = TileCache::new(2);
        let first = TileCoord::new(1, 1, 1);
        let second = TileCoord::new(2, 2, 2);
        let third = TileCoord::new(3, 3, 3);

        cache.insert(first, vec![1]);
        cache.insert(second, vec![2]);
        // Reading `first` makes `second` the eviction candidate
        assert!(cache.get(&first).is_some());
        cache.insert(third, vec![3]);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&first));
        assert!(!cache.contains(&second));
        assert!(cache.contains(&third));
    }

    #[test]
    fn test_zero_capacity_holds_one_tile() {
        assert_eq!(TileCache::new(0).capacity(), 1);
    }
}
