//! Cache manager collaborator slot.
//!
//! # Shiro Equivalent
//! `org.apache.shiro.cache.CacheManager` / `MemoryConstrainedCacheManager`

use std::sync::Arc;

use dashmap::DashMap;

/// A named cache of string entries.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// Provides named caches to the rest of the engine.
pub trait CacheManager: Send + Sync {
    fn cache(&self, name: &str) -> Arc<dyn Cache>;
}

#[derive(Default)]
struct MemoryCache {
    entries: DashMap<String, String>,
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn put(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    fn clear(&self) {
        self.entries.clear();
    }
}

/// Unbounded in-memory cache manager.
#[derive(Default)]
pub struct MemoryCacheManager {
    caches: DashMap<String, Arc<MemoryCache>>,
}

impl MemoryCacheManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheManager for MemoryCacheManager {
    fn cache(&self, name: &str) -> Arc<dyn Cache> {
        Arc::clone(
            &self
                .caches
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(MemoryCache::default())),
        ) as Arc<dyn Cache>
    }
}
