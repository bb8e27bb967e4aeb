use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const DEFAULT_RELATED_LIMIT: u32 = 3;
pub const DEFAULT_FEATURED_LIMIT: u32 = 6;
pub const MAX_LIST_LIMIT: u32 = 50;

/// Redis key prefix under which rendered pages are cached.
pub const PAGE_CACHE_KEY_PREFIX: &str = "page:";
pub const PAGE_INVALIDATION_CHANNEL: &str = "page-invalidations";
pub const REVALIDATE_SECRET_HEADER: &str = "x-revalidate-secret";
