use async_trait::async_trait;
use deadpool_redis::{Config, Pool, Runtime};

use crate::{
    cache::{CacheError, PageCache},
    constants::{PAGE_CACHE_KEY_PREFIX, PAGE_INVALIDATION_CHANNEL},
};

/// Drops the cached render of a page and announces it on a pub/sub channel
/// so other renderers can evict their in-memory copies.
#[derive(Clone)]
pub struct RedisPageCache {
    pool: Pool,
}

impl RedisPageCache {
    /// Builds the pool without connecting; the first invalidation connects.
    pub fn from_url(url: &str) -> Result<Self, CacheError> {
        let pool = Config::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Config(e.to_string()))?;

        Ok(Self { pool })
    }
}

pub fn page_key(path: &str) -> String {
    format!("{}{}", PAGE_CACHE_KEY_PREFIX, path)
}

#[async_trait]
impl PageCache for RedisPageCache {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
        let mut conn = self.pool
            .get()
            .await
            .map_err(|e| CacheError::Redis(e.to_string()))?;

        redis::pipe()
            .atomic()
            .del(page_key(path)).ignore()
            .publish(PAGE_INVALIDATION_CHANNEL, path).ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Redis(e.to_string()))
    }
}
