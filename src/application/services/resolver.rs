//! Redirect resolver: the hot path.
//!
//! Resolves a public key to the next destination in rotation using a
//! two-tier lookup: rotation cache first, durable store on a miss. This is
//! deliberately an explicit lookup function rather than caching middleware —
//! the cursor's sliding TTL and position-based fallback are business logic,
//! not generic caching.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::LinkRepository;
use crate::domain::rotation::{LinkSnapshot, next_cursor};
use crate::error::AppError;
use crate::infrastructure::cache::{RotationCache, cursor_key, snapshot_key};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub link_id: i64,
    pub destination_id: i64,
    pub url: String,
}

/// Resolves keys to destinations and advances rotation state.
///
/// # Concurrency
///
/// The read-cursor → compute-next → write-cursor sequence is not atomic:
/// two concurrent requests for the same key may both serve the same position
/// and skip the next one. That fairness drift is an accepted approximation of
/// round-robin; strict ordering would require an atomic increment in the
/// cache layer. Cache population on concurrent misses races too, which is
/// safe: both writers store the same snapshot.
pub struct RedirectResolver {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn RotationCache>,
    cache_ttl: u64,
}

impl RedirectResolver {
    pub fn new(links: Arc<dyn LinkRepository>, cache: Arc<dyn RotationCache>, cache_ttl: u64) -> Self {
        Self {
            links,
            cache,
            cache_ttl,
        }
    }

    /// Resolves `key` to the destination to serve now.
    ///
    /// Never blocks on click accounting; the caller dispatches the click
    /// event after the response is decided.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown or inactive key, or one
    /// with no destinations. Cache failures never surface here — they degrade
    /// to durable-store reads. A store failure on a cache miss is
    /// [`AppError::Internal`]: there is no further fallback.
    pub async fn resolve(&self, key: &str) -> Result<Resolution, AppError> {
        let snapshot = self.load_snapshot(key).await?;

        let cursor = self.read_cursor(key).await;

        // Position match with fallback to the first destination: a stale
        // cursor from before a shrink must degrade, not fail.
        let destination = snapshot
            .select(cursor)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "key": key })))?;

        let next = next_cursor(cursor, snapshot.destination_count());

        // Sliding expiry: refreshed on every request, so rotation state for
        // idle links decays back to the start. Best-effort write.
        let _ = self
            .cache
            .set(&cursor_key(key), &next.to_string(), self.cache_ttl)
            .await;

        Ok(Resolution {
            link_id: snapshot.id,
            destination_id: destination.id,
            url: destination.url.clone(),
        })
    }

    /// Two-tier snapshot lookup: cache, then durable store with best-effort
    /// repopulation. Undecodable cache payloads count as misses.
    async fn load_snapshot(&self, key: &str) -> Result<LinkSnapshot, AppError> {
        let skey = snapshot_key(key);

        if let Ok(Some(raw)) = self.cache.get(&skey).await {
            match serde_json::from_str::<LinkSnapshot>(&raw) {
                Ok(snapshot) if snapshot.destination_count() > 0 => {
                    counter!("rotation_cache_hits_total").increment(1);
                    return Ok(snapshot);
                }
                Ok(_) => {
                    debug!(key, "cached snapshot has no destinations, treating as miss");
                }
                Err(e) => {
                    warn!(key, error = %e, "undecodable cached snapshot, treating as miss");
                }
            }
        }

        counter!("rotation_cache_misses_total").increment(1);

        let link = self
            .links
            .find_active_by_key(key)
            .await?
            .filter(|link| !link.destinations.is_empty())
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "key": key })))?;

        let snapshot = LinkSnapshot::from_link(&link);

        // Best-effort repopulation: a failed write must not fail resolution,
        // and concurrent misses overwriting each other is idempotent.
        match serde_json::to_string(&snapshot) {
            Ok(payload) => {
                let _ = self.cache.set(&skey, &payload, self.cache_ttl).await;
            }
            Err(e) => warn!(key, error = %e, "failed to encode snapshot"),
        }

        Ok(snapshot)
    }

    /// Reads the rotation cursor; any miss, failure, or garbage restarts at 0.
    async fn read_cursor(&self, key: &str) -> u32 {
        self.cache
            .get(&cursor_key(key))
            .await
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }
}
