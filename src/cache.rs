use std::sync::Arc;

use moka::sync::Cache;

use crate::libxml2::XmlSchemaPtr;

/// In-memory cache of compiled schemas, keyed by schema namespace URI.
///
/// Compiling an IP-XACT schema family is expensive, so every loader that
/// shares a `SchemaCache` compiles a given release at most once while the
/// entry stays resident.
pub struct SchemaCache {
    cache: Cache<String, XmlSchemaPtr>,
}

impl SchemaCache {
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_capacity).build();

        Self { cache }
    }

    /// Get a compiled schema, or run `loader` and remember its result.
    ///
    /// Concurrent misses on one key wait for a single `loader` run and share
    /// its outcome. Failed loads are not cached, so a later call retries the
    /// compile.
    pub fn get_or_load<F, E>(&self, key: &str, loader: F) -> Result<XmlSchemaPtr, Arc<E>>
    where
        F: FnOnce() -> Result<XmlSchemaPtr, E>,
        E: Send + Sync + 'static,
    {
        self.cache.try_get_with_by_ref(key, loader)
    }

    pub fn get(&self, key: &str) -> Option<XmlSchemaPtr> {
        self.cache.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    pub fn remove(&self, key: &str) {
        self.cache.invalidate(key);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();

        CacheStats {
            entry_count: self.cache.entry_count(),
        }
    }
}

/// Statistics for the compiled schema cache
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub entry_count: u64,
}
