/// Redis caching layer for the article catalog server.
///
/// All reads return `Option<T>` for graceful degradation: if Redis is
/// unavailable, callers fall through and recompute from the in-memory store.
///
/// Key schema (namespaced to avoid collisions):
/// - `artcat:v1:view:{sha256(query, category)}`: JSON BrowseArticlesResponse (TTL: 900s)
/// - `artcat:v1:article:{id}`: JSON Article (no TTL, invalidated on reload)
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::model::{Article, BrowseArticlesResponse};
use catalog_common::redis::RedisCache;

const KEY_PREFIX: &str = "artcat:v1:";
const VIEW_TTL_SECS: u64 = 900;

pub struct CatalogCache {
    redis: RedisCache,
}

impl CatalogCache {
    pub fn new(redis: RedisCache) -> Self {
        Self { redis }
    }

    // --- Computed views ---

    pub async fn get_view(&self, query: &str, category_id: &str) -> Option<BrowseArticlesResponse> {
        let key = view_key(query, category_id);
        let json = self.redis.get(&key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_view(&self, query: &str, category_id: &str, view: &BrowseArticlesResponse) {
        let key = view_key(query, category_id);
        if let Ok(json) = serde_json::to_string(view) {
            self.redis.set_with_ttl(&key, &json, VIEW_TTL_SECS).await;
        }
    }

    // --- Single articles ---

    pub async fn get_article(&self, id: &str) -> Option<Article> {
        let key = format!("{KEY_PREFIX}article:{id}");
        let json = self.redis.get(&key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_article(&self, article: &Article) {
        let key = format!("{KEY_PREFIX}article:{}", article.id);
        if let Ok(json) = serde_json::to_string(article) {
            self.redis.set(&key, &json).await;
        }
    }

    // --- Invalidation ---

    /// Delete all cached data. Used after a snapshot reload.
    pub async fn invalidate_all(&self) {
        self.redis.delete_by_prefix(KEY_PREFIX).await;
    }
}

/// Deterministic cache key for one (query, category) view computation.
///
/// Each input is length-prefixed before hashing so no pair of distinct
/// inputs can produce the same digest.
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
    fn view_keys_are_deterministic() {
        assert_eq!(view_key("crypto", "all"), view_key("crypto", "all"));
    }

    #[test]
    fn view_keys_distinguish_inputs() {
        assert_ne!(view_key("crypto", "all"), view_key("crypto", "privacy"));
        assert_ne!(view_key("crypto", "all"), view_key("privacy", "all"));
        assert_ne!(view_key("ab", "c"), view_key("a", "bc"));
    }
}
