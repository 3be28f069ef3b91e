use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use super::Resolver;
use crate::error::ResolveError;

/// TTL-caching decorator over another resolver.
///
/// Only successful resolutions are cached; misses always go back to the
/// decorated source. Expired entries are refreshed on access.
pub struct CachingResolver {
    inner: Arc<dyn Resolver>,
    ttl: Duration,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

struct CacheEntry {
    value: String,
    cached_at: Instant,
}

impl CachingResolver {
    pub fn new(inner: Arc<dyn Resolver>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Drop all cached entries.
    pub fn invalidate(&self) {
        self.cache.write().clear();
    }
}

impl Resolver for CachingResolver {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        {
            let cache = self.cache.read();
            if let Some(entry) = cache.get(name) {
                if entry.cached_at.elapsed() < self.ttl {
                    return Ok(Some(entry.value.clone()));
                }
            }
        }

        let resolved = self.inner.resolve(name)?;
        if let Some(value) = &resolved {
            debug!(name, "caching resolved property");
            self.cache.write().insert(
                name.to_string(),
                CacheEntry {
                    value: value.clone(),
                    cached_at: Instant::now(),
                },
            );
        }
        Ok(resolved)
    }
}
