//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, RotationCache};
use async_trait::async_trait;
use tracing::debug;

/// A rotation cache that does nothing.
///
/// Used when Redis is unavailable or caching is explicitly disabled. Every
/// read is a miss, so every redirect falls through to the durable store and
/// rotation restarts at position 0 — slower and stuck on the first
/// destination, but still serving correct redirects.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (rotation caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RotationCache for NullCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
