use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::cache::PageCache;

/// Drains invalidation batches in the order they were enqueued and forwards
/// each path to `cache`. Failures are logged and skipped. Returns once every
/// [`crate::cache::InvalidationQueue`] has been dropped.
pub async fn start_invalidation_worker(
    mut receiver: UnboundedReceiver<Vec<String>>,
    cache: Arc<dyn PageCache>,
) {
    tracing::info!(backend = cache.backend(), "Page invalidation worker started");

    while let Some(batch) = receiver.recv().await {
        let mut seen: Vec<&str> = Vec::with_capacity(batch.len());

        for path in &batch {
            if seen.contains(&path.as_str()) {
                continue;
            }
            seen.push(path.as_str());

            match cache.invalidate(path).await {
                Ok(()) => tracing::debug!(path = %path, "Page invalidated"),
                Err(e) => tracing::warn!(path = %path, "Page invalidation failed: {}", e),
            }
        }
    }

    tracing::info!("Page invalidation worker stopped");
}
