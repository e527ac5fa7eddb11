//! In-memory cache implementation using moka

use std::fmt;
use std::time::Duration;

use moka::ops::compute::Op;
use moka::sync::Cache as MokaCache;
use tokio::time::Instant;
use tracing::trace;

use crate::domain::cache::Cache;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Name used in log events
    pub name: String,
    /// TTL applied to every entry
    pub ttl: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            name: "cache".to_string(),
            ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when the TTL is too large to represent, i.e. never expires
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Unbounded, thread-safe TTL cache
///
/// Expiry is lazy: moka is built without its own TTL or capacity, and an entry
/// is only dropped when a read finds it stale. The clock is tokio's, so tests
/// can pause and advance time.
pub struct InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    entries: MokaCache<String, CacheEntry<V>>,
    config: InMemoryCacheConfig,
}

impl<V> InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new in-memory cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self::with_config(InMemoryCacheConfig::default().with_ttl(ttl))
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        Self {
            entries: MokaCache::builder().build(),
            config,
        }
    }

    /// Removes the entry only if it is still the stale one; a concurrent fresh
    /// write in between must survive.
    fn purge_if_expired(&self, key: &str, now: Instant) {
        self.entries
            .entry_by_ref(key)
            .and_compute_with(|current| match current {
                Some(entry) if entry.value().is_expired(now) => Op::Remove,
                _ => Op::Nop,
            });
    }
}

impl<V> fmt::Debug for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("name", &self.config.name)
            .field("ttl", &self.config.ttl)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl<V> Cache<V> for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn read(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        let now = Instant::now();

        if entry.is_expired(now) {
            trace!(cache = %self.config.name, "Purging expired entry");
            self.purge_if_expired(key, now);
            return None;
        }

        Some(entry.value)
    }

    fn write(&self, key: &str, value: V) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(self.config.ttl),
        };

        self.entries.insert(key.to_string(), entry);
    }

    fn ttl(&self) -> Duration {
        self.config.ttl
    }

    fn len(&self) -> usize {
        self.entries.run_pending_tasks();
        self.entries.entry_count() as usize
    }

    fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_write_then_read() {
        let cache = InMemoryCache::new(TTL);

        cache.write("key1", vec!["value1".to_string()]);

        assert_eq!(cache.read("key1"), Some(vec!["value1".to_string()]));
    }

    #[tokio::test]
    async fn test_read_missing() {
        let cache: InMemoryCache<String> = InMemoryCache::new(TTL);

        assert_eq!(cache.read("missing"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_until_ttl_elapses() {
        let cache = InMemoryCache::new(TTL);
        cache.write("key1", 42);

        tokio::time::advance(TTL - Duration::from_millis(1)).await;

        assert_eq!(cache.read("key1"), Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_absent_and_removed() {
        let cache = InMemoryCache::new(TTL);
        cache.write("key1", 42);

        tokio::time::advance(TTL + Duration::from_millis(1)).await;

        assert_eq!(cache.read("key1"), None);
        assert!(!cache.entries.contains_key("key1"));
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_exactly_at_ttl() {
        let cache = InMemoryCache::new(TTL);
        cache.write("key1", 42);

        tokio::time::advance(TTL).await;

        assert_eq!(cache.read("key1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_is_lazy() {
        let cache = InMemoryCache::new(TTL);
        cache.write("stale", 1);

        tokio::time::advance(TTL * 2).await;

        // Nothing has read the entry yet, so it is still stored
        assert!(cache.entries.contains_key("stale"));
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.read("stale"), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewrite_extends_expiry() {
        let cache = InMemoryCache::new(TTL);
        cache.write("key1", 1);

        tokio::time::advance(TTL / 2).await;
        cache.write("key1", 2);
        tokio::time::advance(TTL / 2 + Duration::from_secs(1)).await;

        assert_eq!(cache.read("key1"), Some(2));
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let cache = InMemoryCache::new(TTL);

        cache.write("key1", "first".to_string());
        cache.write("key1", "second".to_string());

        assert_eq!(cache.read("key1"), Some("second".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_idempotent_write() {
        let cache = InMemoryCache::new(TTL);

        cache.write("key1", 7);
        cache.write("key1", 7);

        assert_eq!(cache.read("key1"), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_serves() {
        let cache = InMemoryCache::new(Duration::ZERO);
        cache.write("key1", 1);

        assert_eq!(cache.read("key1"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_ttl_never_expires() {
        let cache = InMemoryCache::new(Duration::MAX);
        cache.write("key1", 1);

        tokio::time::advance(Duration::from_secs(10 * 365 * 24 * 3600)).await;

        assert_eq!(cache.read("key1"), Some(1));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = InMemoryCache::new(TTL);
        cache.write("key1", 1);
        cache.write("key2", 2);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.read("key1"), None);
    }

    #[tokio::test]
    async fn test_independent_instances() {
        let parse_cache = InMemoryCache::new(TTL);
        let search_cache: InMemoryCache<&str> = InMemoryCache::new(TTL);

        parse_cache.write("same-key", "parse");

        assert_eq!(search_cache.read("same-key"), None);
        assert_eq!(parse_cache.read("same-key"), Some("parse"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_keep_mapping_consistent() {
        let cache = Arc::new(InMemoryCache::new(TTL));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for j in 0..50 {
                        let key = format!("key-{}", j % 10);
                        cache.write(&key, i);
                        let _ = cache.read(&key);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len(), 10);
        for j in 0..10 {
            assert!(cache.read(&format!("key-{}", j)).is_some());
        }
    }

    #[test]
    fn test_config() {
        let config = InMemoryCacheConfig::default()
            .with_name("parse")
            .with_ttl(Duration::from_millis(300_000));

        let cache: InMemoryCache<u8> = InMemoryCache::with_config(config);

        assert_eq!(cache.ttl(), Duration::from_secs(300));
        assert_eq!(cache.config.name, "parse");
    }
}
