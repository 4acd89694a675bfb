/// Redis caching layer for the marketplace catalog server.
///
/// Reads return `Option<T>`; on a miss or Redis failure callers recompute
/// from the in-memory store.
///
/// Key schema:
/// - `mktcat:v1:view:{sha256(query, category)}`: JSON BrowseMarketResponse (TTL: 900s)
/// - `mktcat:v1:listing:{id}`: JSON Listing (no TTL, invalidated on reload)
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::model::{BrowseMarketResponse, Listing};
use catalog_common::redis::RedisCache;

const KEY_PREFIX: &str = "mktcat:v1:";
const VIEW_TTL_SECS: u64 = 900;

pub struct CatalogCache {
    redis: RedisCache,
}

impl CatalogCache {
    pub fn new(redis: RedisCache) -> Self {
        Self { redis }
    }

    pub async fn get_view(&self, query: &str, category_id: &str) -> Option<BrowseMarketResponse> {
        let key = view_key(query, category_id);
        let json = self.redis.get(&key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_view(&self, query: &str, category_id: &str, view: &BrowseMarketResponse) {
        let key = view_key(query, category_id);
        if let Ok(json) = serde_json::to_string(view) {
            self.redis.set_with_ttl(&key, &json, VIEW_TTL_SECS).await;
        }
    }

    pub async fn get_listing(&self, id: &str) -> Option<Listing> {
        let key = format!("{KEY_PREFIX}listing:{id}");
        let json = self.redis.get(&key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_listing(&self, listing: &Listing) {
        let key = format!("{KEY_PREFIX}listing:{}", listing.id);
        if let Ok(json) = serde_json::to_string(listing) {
            self.redis.set(&key, &json).await;
        }
    }

    /// Delete all cached data after a snapshot reload.
    pub async fn invalidate_all(&self) {
        self.redis.delete_by_prefix(KEY_PREFIX).await;
    }
}

/// Deterministic cache key for one (query, category) view computation.
/// Inputs are length-prefixed so distinct pairs cannot collide.
fn view_key(query: &str, category_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.len().to_le_bytes());
    hasher.update(query.as_bytes());
    hasher.update(category_id.as_bytes());
    let hash = hasher.finalize();
    format!("{KEY_PREFIX}view:{hash:x}")
}

#[cfg(test)]
mod tests {
    use super::view_key;

    #[test]
    fn view_keys_track_their_inputs() {
        assert_eq!(view_key("vpn", "hardware"), view_key("vpn", "hardware"));
        assert_ne!(view_key("vpn", "hardware"), view_key("vpn", "all"));
        assert_ne!(view_key("ab", "c"), view_key("a", "bc"));
    }
}
