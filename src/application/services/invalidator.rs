//! Cache invalidation for link mutations.

use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::cache::{RotationCache, cursor_key, snapshot_key};

/// Purges a link's cache entries when its destination set changes.
///
/// Invoked synchronously by the administrative update/rename/delete path
/// before success is returned to the caller, bounding staleness to the
/// cache's own request latency rather than the TTL. This is the only strong
/// ordering guarantee in the system.
pub struct CacheInvalidator {
    cache: Arc<dyn RotationCache>,
}

impl CacheInvalidator {
    pub fn new(cache: Arc<dyn RotationCache>) -> Self {
        Self { cache }
    }

    /// Deletes both the snapshot entry and the rotation cursor for `key`.
    ///
    /// Cache deletions are fail-open like every other cache operation; a
    /// failed delete leaves at most TTL-bounded staleness, and a stale
    /// cursor degrades to destination 0 in the resolver.
    pub async fn purge(&self, key: &str) {
        let _ = self.cache.delete(&snapshot_key(key)).await;
        let _ = self.cache.delete(&cursor_key(key)).await;
        debug!(key, "rotation cache purged");
    }
}
