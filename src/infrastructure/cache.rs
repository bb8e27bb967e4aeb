//! Page-cache invalidation.
//!
//! Writes never talk to the cache backend directly. Use cases call
//! [`InvalidationQueue::notify`] once the statement has returned, and the
//! worker in [`crate::background_task`] forwards each path to the configured
//! [`PageCache`]. Invalidating a path twice is harmless, so nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use derive_more::Display;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::settings::AppConfig;

pub mod redis_cache;
pub mod revalidate_webhook;

pub use redis_cache::RedisPageCache;
pub use revalidate_webhook::RevalidateWebhook;

#[derive(Debug, Display)]
pub enum CacheError {
    #[display("Revalidation request failed: {_0}")]
    Request(String),

    #[display("Revalidation rejected with status {_0}")]
    Rejected(u16),

    #[display("Redis operation failed: {_0}")]
    Redis(String),

    #[display("Cache backend misconfigured: {_0}")]
    Config(String),
}

impl std::error::Error for CacheError {}

#[async_trait]
pub trait PageCache: Send + Sync {
    /// Short name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Marks the rendered output of `path` as stale.
    async fn invalidate(&self, path: &str) -> Result<(), CacheError>;
}

/// Used when neither a webhook nor Redis is configured.
#[derive(Debug, Default)]
pub struct LogOnlyPageCache;

#[async_trait]
impl PageCache for LogOnlyPageCache {
    fn backend(&self) -> &'static str {
        "log-only"
    }

    async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
        tracing::info!(path, "Page marked stale (no cache backend configured)");
        Ok(())
    }
}

/// Picks the backend from configuration: webhook first, then Redis.
pub fn page_cache_from_config(config: &AppConfig) -> Result<Arc<dyn PageCache>, CacheError> {
    if let Some(url) = &config.revalidate_url {
        return Ok(Arc::new(RevalidateWebhook::new(url, config.revalidate_secret.clone())?));
    }
    if let Some(url) = &config.redis_url {
        return Ok(Arc::new(RedisPageCache::from_url(url)?));
    }
    Ok(Arc::new(LogOnlyPageCache))
}

/// Sending half of the post-commit notification channel.
#[derive(Debug, Clone)]
pub struct InvalidationQueue {
    sender: UnboundedSender<Vec<String>>,
}

impl InvalidationQueue {
    pub fn channel() -> (Self, UnboundedReceiver<Vec<String>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Enqueues `paths` for invalidation. Never fails the caller: if the
    /// worker is gone the pages simply stay stale until the next write.
    pub fn notify(&self, paths: Vec<String>) {
        if paths.is_empty() {
            return;
        }
        if let Err(e) = self.sender.send(paths) {
            tracing::warn!(paths = ?e.0, "Invalidation worker is not running, pages stay stale");
        }
    }
}
