//! Zoom-scoped page cache
//!
//! Memoizes one rendered image per page index. Every entry belongs to the
//! same zoom level; callers invalidate by clearing the whole cache when the
//! zoom changes, so there is no per-entry eviction and no size bound beyond
//! the document's page count.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Statistics about cache usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of pages currently cached
    pub entries: usize,

    /// Number of lookups served from the cache
    pub hits: u64,

    /// Number of lookups that had to render
    pub misses: u64,

    /// Number of successful renders stored in the cache
    pub renders: u64,

    /// Number of renders that failed (nothing stored)
    pub failures: u64,

    /// Number of times the whole cache was cleared
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Page index -> rendered image, for a single zoom level.
#[derive(Debug)]
pub struct PageCache<V> {
    pages: HashMap<usize, V>,
    stats: CacheStats,
}

impl<V> Default for PageCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PageCache<V> {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Return the cached image for `page`, rendering it on a miss.
    ///
    /// `render` runs at most once and only on a miss. A failed render is
    /// returned to the caller and nothing is stored, so the next lookup
    /// tries again.
    pub fn get_or_render<E, F>(&mut self, page: usize, render: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        match self.pages.entry(page) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                match render() {
                    Ok(image) => {
                        self.stats.renders += 1;
                        self.stats.entries += 1;
                        Ok(entry.insert(image))
                    }
                    Err(e) => {
                        self.stats.failures += 1;
                        Err(e)
                    }
                }
            }
        }
    }

    /// Look at a cached page without rendering or touching statistics
    pub fn get(&self, page: usize) -> Option<&V> {
        self.pages.get(&page)
    }

    pub fn contains(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Drop every cached page
    pub fn clear(&mut self) {
        if !self.pages.is_empty() {
            log::debug!("Clearing page cache ({} pages)", self.pages.len());
        }
        self.pages.clear();
        self.stats.entries = 0;
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn render_ok<'a>(
        calls: &'a Cell<u32>,
        value: &'static str,
    ) -> impl FnOnce() -> Result<&'static str, String> + 'a {
        move || {
            calls.set(calls.get() + 1);
            Ok(value)
        }
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = PageCache::new();
        let calls = Cell::new(0);

        assert_eq!(cache.get_or_render(3, render_ok(&calls, "page-3")), Ok(&"page-3"));
        assert_eq!(cache.get_or_render(3, render_ok(&calls, "other")), Ok(&"page-3"));

        assert_eq!(calls.get(), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.renders, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_failure_not_cached() {
        let mut cache: PageCache<u32> = PageCache::new();

        let result = cache.get_or_render(0, || Err("corrupt page"));
        assert_eq!(result, Err("corrupt page"));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().failures, 1);

        // Retried on the next lookup
        assert_eq!(cache.get_or_render(0, || Ok::<_, &str>(7)), Ok(&7));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_clear_forces_rerender() {
        let mut cache = PageCache::new();
        let calls = Cell::new(0);

        cache.get_or_render(0, render_ok(&calls, "a")).unwrap();
        cache.get_or_render(1, render_ok(&calls, "b")).unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(0));
        assert_eq!(cache.stats().invalidations, 1);
        assert_eq!(cache.stats().entries, 0);

        cache.get_or_render(0, render_ok(&calls, "a2")).unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(cache.get(0), Some(&"a2"));
    }

    #[test]
    fn test_get_does_not_count() {
        let mut cache: PageCache<u8> = PageCache::new();
        assert_eq!(cache.get(0), None);
        cache.get_or_render(0, || Ok::<_, ()>(1)).unwrap();
        assert_eq!(cache.get(0), Some(&1));
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
