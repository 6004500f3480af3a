//! Rotation cache trait, key derivation, and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
    #[error("Cache operation timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache key for a link's denormalized destination snapshot.
pub fn snapshot_key(link_key: &str) -> String {
    format!("link:{link_key}")
}

/// Cache key for a link's rotation cursor.
pub fn cursor_key(link_key: &str) -> String {
    format!("rotation:{link_key}")
}

/// Trait for the rotation cache consumed by the redirect resolver.
///
/// The cache holds two kinds of entries per link key: a JSON snapshot of the
/// destination set and a plain-integer rotation cursor, both TTL-bounded.
/// Implementations must be thread-safe and handle errors gracefully: the
/// resolver treats every failure as a miss and degrades to the durable store,
/// so a cache outage slows redirects but never breaks them.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis with namespace prefix and per-op timeout
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process TTL map
/// - [`crate::infrastructure::cache::NullCache`] - Caching disabled
#[async_trait]
pub trait RotationCache: Send + Sync {
    /// Retrieves a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Production implementations should not return errors; failures are
    /// logged and reported as misses (fail-open behavior).
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with a TTL in seconds.
    ///
    /// Setting an existing key refreshes its TTL, which gives the rotation
    /// cursor its sliding expiry.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations log failures
    /// and return `Ok(())` to avoid disrupting the request flow.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()>;

    /// Removes an entry. Used by the cache invalidator.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
