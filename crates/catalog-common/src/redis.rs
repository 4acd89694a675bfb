/// Redis cache wrapper with graceful degradation.
///
/// Every operation swallows Redis failures: reads return `None`, writes
/// return `false`, and a warning is logged. The catalog servers are fully
/// functional without Redis.
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::warn;

pub struct RedisCache {
    client: Option<redis::Client>,
}

impl RedisCache {
    /// Create a cache handle. A missing or invalid URL yields a handle whose
    /// operations all no-op.
    pub fn new(url: Option<&str>) -> Self {
        let client = url.and_then(|u| {
            redis::Client::open(u)
                .inspect_err(|e| warn!(error = %e, url = u, "failed to create redis client, cache disabled"))
                .ok()
        });
        Self { client }
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        let client = self.client.as_ref()?;
        client
            .get_multiplexed_async_connection()
            .await
            .inspect_err(|e| warn!(error = %e, "redis connection failed"))
            .ok()
    }

    /// Ping the server. Returns `true` when Redis is reachable.
    pub async fn is_available(&self) -> bool {
        match self.connection().await {
            Some(mut conn) => {
                let result: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
                result.is_ok()
            }
            None => false,
        }
    }

    /// Get a value. `None` when Redis is unavailable or the key is absent.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis GET failed"))
            .ok()?;
        value
    }

    /// Set a value with no expiry. Returns `true` if successful.
    pub async fn set(&self, key: &str, value: &str) -> bool {
        let Some(mut conn) = self.connection().await else {
            return false;
        };
        conn.set::<_, _, ()>(key, value)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis SET failed"))
            .is_ok()
    }

    /// Set a value with a TTL in seconds. Returns `true` if successful.
    pub async fn set_with_ttl(&self, key: &str, value: &str, ttl_secs: u64) -> bool {
        let Some(mut conn) = self.connection().await else {
            return false;
        };
        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .inspect_err(|e| warn!(error = %e, key, "redis SETEX failed"))
            .is_ok()
    }

    /// Delete every key under a prefix using SCAN (not KEYS, which blocks).
    pub async fn delete_by_prefix(&self, prefix: &str) -> bool {
        let Some(mut conn) = self.connection().await else {
            return false;
        };

        let pattern = format!("{prefix}*");
        let mut cursor: u64 = 0;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = match redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, pattern, "redis SCAN failed");
                    return false;
                }
            };

            if !keys.is_empty() {
                if let Err(e) = conn.del::<_, ()>(&keys).await {
                    warn!(error = %e, "redis batch DEL failed during prefix delete");
                    return false;
                }
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::RedisCache;

    #[tokio::test]
    async fn missing_url_degrades_to_noop() {
        let cache = RedisCache::new(None);
        assert!(!cache.is_available().await);
        assert_eq!(cache.get("any-key").await, None);
        assert!(!cache.set("any-key", "value").await);
    }

    #[tokio::test]
    async fn invalid_url_degrades_to_noop() {
        let cache = RedisCache::new(Some("not-a-redis-url"));
        assert!(!cache.is_available().await);
        assert_eq!(cache.get("any-key").await, None);
    }
}
