use dashmap::DashMap;
use pressbase_domain::DomainError;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use super::pattern::PatternCompiler;

/// One cached value with its expiry deadline. Never leaves this module.
struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Shared in-process TTL cache.
///
/// One instance per process, constructed at startup and handed to the
/// repositories by injection. There is no cross-process invalidation: in a
/// multi-process deployment each process sees only its own purges, so
/// cached reads elsewhere stay stale until their TTL elapses.
///
/// Concurrent `get_or_load` misses for the same key may each run their
/// loader; the redundant load is accepted in exchange for never holding a
/// lock across an await point. Last write wins.
pub struct CacheStore {
    entries: DashMap<String, CacheEntry>,
    patterns: PatternCompiler,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            patterns: PatternCompiler::new(),
        }
    }

    /// Returns the cached value for `key` if present and fresh.
    ///
    /// Expired entries are evicted lazily here. An entry holding a value of
    /// the wrong type counts as a cache failure and is treated as absent
    /// (evicted), never as an error for the caller.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(now) {
                drop(entry);
                self.entries.remove(key);
                return None;
            }
            match entry.value.downcast_ref::<T>() {
                Some(value) => return Some(value.clone()),
                None => {
                    debug!(key, "Cached value has unexpected type, evicting");
                    drop(entry);
                    self.entries.remove(key);
                    return None;
                }
            }
        }
        None
    }

    /// Stores `value` under `key`, overwriting unconditionally.
    ///
    /// A TTL is required; `Duration::ZERO` would mean an unbounded
    /// staleness window and is rejected as a caller error.
    pub fn set<T: Send + Sync + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        if ttl.is_zero() {
            return Err(DomainError::Validation(
                "Cache TTL must be greater than zero".to_string(),
            ));
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: Arc::new(value),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    /// Read-through load: cached value if fresh, otherwise runs `loader`,
    /// stores its result under `ttl`, and returns it.
    ///
    /// Cancellation propagates naturally: dropping the returned future
    /// drops the loader future. Loader errors are returned as-is and
    /// nothing is cached for them.
    pub async fn get_or_load<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> Result<T, DomainError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        if ttl.is_zero() {
            return Err(DomainError::Validation(
                "Cache TTL must be greater than zero".to_string(),
            ));
        }

        if let Some(value) = self.get::<T>(key) {
            return Ok(value);
        }

        let value = loader().await?;
        self.set(key, value.clone(), ttl)?;
        Ok(value)
    }

    /// Removes `key`. Idempotent: deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Removes every key matching `glob` and returns how many were purged.
    ///
    /// The key list is snapshotted before removal so concurrent writers
    /// cannot cause entries to be skipped mid-iteration.
    pub fn delete_pattern(&self, glob: &str) -> Result<usize, DomainError> {
        let regex = self.patterns.compile(glob)?;

        let keys: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.key().clone())
            .collect();

        let mut purged = 0;
        for key in keys {
            if regex.is_match(&key) && self.entries.remove(&key).is_some() {
                purged += 1;
            }
        }

        debug!(glob, purged, "Cache pattern purge");
        Ok(purged)
    }

    /// Removes everything. Tests and emergency use only.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of live (possibly expired, not yet evicted) entries.
    /// Diagnostics surface, not for control flow.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// All current keys. Diagnostics surface, not for control flow.
    pub fn list_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
