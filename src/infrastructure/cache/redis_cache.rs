//! Redis-backed rotation cache implementation.

use std::time::Duration;

use super::service::{CacheError, CacheResult, RotationCache};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for rotation snapshots and cursors.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. All operations are fail-open: errors and timeouts are logged but
/// reported as misses so the resolver falls through to the durable store.
/// Every call is bounded by a short timeout; a slow cache must never stall
/// the fallback path.
pub struct RedisCache {
    client: ConnectionManager,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `op_timeout_ms` - Upper bound for any single cache operation;
    ///   controlled via `CACHE_OP_TIMEOUT_MS`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, op_timeout_ms: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            op_timeout: Duration::from_millis(op_timeout_ms),
            key_prefix: "rotator:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// Bounds a cache future by the configured operation timeout.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<redis::RedisResult<T>, CacheError> {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout.as_millis() as u64))
    }
}

#[async_trait]
impl RotationCache for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match self.bounded(conn.get::<_, Option<String>>(&full_key)).await {
            Ok(Ok(Some(value))) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            Ok(Ok(None)) => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
            Ok(Err(e)) => {
                error!("Redis GET error for {}: {}", key, e);
                Ok(None)
            }
            Err(timeout) => {
                warn!("Redis GET for {}: {}", key, timeout);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match self
            .bounded(conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds))
            .await
        {
            Ok(Ok(())) => {
                debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Redis SET error for {}: {}", key, e);
                Ok(())
            }
            Err(timeout) => {
                warn!("Redis SET for {}: {}", key, timeout);
                Ok(())
            }
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        match self.bounded(conn.del::<_, i32>(&full_key)).await {
            Ok(Ok(deleted)) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", key);
                }
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("Redis DEL error for {}: {}", key, e);
                Ok(())
            }
            Err(timeout) => {
                warn!("Redis DEL for {}: {}", key, timeout);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        matches!(self.bounded(conn.ping::<()>()).await, Ok(Ok(())))
    }
}
