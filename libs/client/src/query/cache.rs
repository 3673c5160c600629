//! De-duplicating query cache
//!
//! Every read goes through [`QueryCache::fetch`] with a [`QueryKey`] and a
//! loader. Per key the cache moves through
//! `Idle -> Fetching -> Fresh | Errored`, with `Fresh -> Stale` on
//! invalidation or once the entry is older than `stale_after`. A stale entry
//! is reloaded on the next read.
//!
//! While a key is fetching, later readers await the same shared future, so
//! concurrent reads issue one request and all observe the same outcome. A
//! read issued after the key was invalidated never joins the older fetch; it
//! starts a new one that replaces it.
//! Each fetch carries a generation number; a completed fetch only settles
//! the entry it created, never one that replaced it after a refetch, an
//! eviction or [`QueryCache::clear`].

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use tokio::sync::Mutex;

use super::key::QueryKey;
use crate::config::CacheConfig;
use crate::error::{Error, Result};

type CachedValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<CachedValue>>>;

/// Observable lifecycle of one key
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Fetching,
    Fresh,
    Stale,
    Errored(Error),
}

enum Slot {
    Fetching {
        generation: u64,
        fetch: SharedFetch,
        invalidated: bool,
    },
    Ready {
        value: CachedValue,
        fetched_at: Instant,
        stale: bool,
    },
    Failed {
        error: Error,
    },
}

struct Inner {
    entries: LruCache<QueryKey, Slot>,
    next_generation: u64,
}

/// Shared, cloneable cache; clones see the same entries
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Mutex<Inner>>,
    stale_after: Duration,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("stale_after", &self.stale_after)
            .finish_non_exhaustive()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: LruCache::new(capacity),
                next_generation: 0,
            })),
            stale_after: config.stale_after(),
        }
    }

    /// Cached value for `key`, loading it when absent or stale.
    ///
    /// A stored error is returned as-is without calling `load`.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.read(key, load, false).await
    }

    /// Like [`fetch`](Self::fetch) but ignores a fresh value or stored
    /// error. Joins a fetch that is already in flight unless it was
    /// invalidated.
    pub async fn refetch<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.read(key, load, true).await
    }

    async fn read<T, F, Fut>(&self, key: QueryKey, load: F, force: bool) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (generation, fetch) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;

            match inner.entries.get(&key) {
                Some(Slot::Ready {
                    value,
                    fetched_at,
                    stale,
                }) if !force && !*stale && fetched_at.elapsed() < self.stale_after => {
                    tracing::debug!(key = %key, "Query cache hit");
                    return downcast(value.clone(), &key);
                }
                Some(Slot::Failed { error }) if !force => {
                    tracing::debug!(key = %key, error = %error, "Query cache returned stored error");
                    return Err(error.clone());
                }
                Some(Slot::Fetching {
                    generation,
                    fetch,
                    invalidated: false,
                }) => {
                    tracing::debug!(key = %key, "Joining in-flight query");
                    (*generation, fetch.clone())
                }
                _ => {
                    let generation = inner.next_generation;
                    inner.next_generation += 1;

                    let fetch = load()
                        .map(|result| result.map(|value| Arc::new(value) as CachedValue))
                        .boxed()
                        .shared();
                    tracing::debug!(key = %key, generation, "Query cache miss");

                    inner.entries.put(
                        key.clone(),
                        Slot::Fetching {
                            generation,
                            fetch: fetch.clone(),
                            invalidated: false,
                        },
                    );
                    (generation, fetch)
                }
            }
        };

        let result = fetch.await;
        self.settle(&key, generation, &result).await;
        result.and_then(|value| downcast(value, &key))
    }

    /// Store the outcome of fetch `generation` if its entry is still in place
    async fn settle(&self, key: &QueryKey, generation: u64, result: &Result<CachedValue>) {
        let mut inner = self.inner.lock().await;

        let invalidated = match inner.entries.peek(key) {
            Some(Slot::Fetching {
                generation: current,
                invalidated,
                ..
            }) if *current == generation => *invalidated,
            _ => return,
        };

        match result {
            Ok(value) => {
                if let Some(slot) = inner.entries.peek_mut(key) {
                    *slot = Slot::Ready {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                        stale: invalidated,
                    };
                }
            }
            Err(_) if invalidated => {
                inner.entries.pop(key);
            }
            Err(error) => {
                if let Some(slot) = inner.entries.peek_mut(key) {
                    *slot = Slot::Failed {
                        error: error.clone(),
                    };
                }
            }
        }
    }

    /// Store `value` as the fresh entry for `key`, replacing any in-flight
    /// fetch for it
    pub async fn insert<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        let mut inner = self.inner.lock().await;
        tracing::debug!(key = %key, "Query cache seeded");
        inner.entries.put(
            key,
            Slot::Ready {
                value: Arc::new(value),
                fetched_at: Instant::now(),
                stale: false,
            },
        );
    }

    /// Mark every entry of `resource` stale and drop its stored errors.
    ///
    /// Returns the number of entries affected.
    pub async fn invalidate(&self, resource: &str) -> usize {
        let mut inner = self.inner.lock().await;

        let mut failed = Vec::new();
        let mut affected = 0;
        for (key, slot) in inner.entries.iter_mut() {
            if key.resource() != resource {
                continue;
            }
            affected += 1;
            match slot {
                Slot::Ready { stale, .. } => *stale = true,
                Slot::Fetching { invalidated, .. } => *invalidated = true,
                Slot::Failed { .. } => failed.push(key.clone()),
            }
        }
        for key in &failed {
            inner.entries.pop(key);
        }

        tracing::debug!(resource, entries = affected, "Invalidated cached queries");
        affected
    }

    /// Invalidate a single key
    pub async fn invalidate_key(&self, key: &QueryKey) {
        let mut inner = self.inner.lock().await;

        let drop_entry = match inner.entries.peek_mut(key) {
            Some(Slot::Ready { stale, .. }) => {
                *stale = true;
                false
            }
            Some(Slot::Fetching { invalidated, .. }) => {
                *invalidated = true;
                false
            }
            Some(Slot::Failed { .. }) => true,
            None => false,
        };
        if drop_entry {
            inner.entries.pop(key);
        }
    }

    /// Drop every entry; in-flight fetches still resolve for their callers
    pub async fn clear(&self) {
        self.inner.lock().await.entries.clear();
        tracing::debug!("Query cache cleared");
    }

    pub async fn state(&self, key: &QueryKey) -> QueryState {
        let inner = self.inner.lock().await;
        match inner.entries.peek(key) {
            None => QueryState::Idle,
            Some(Slot::Fetching { .. }) => QueryState::Fetching,
            Some(Slot::Ready {
                fetched_at, stale, ..
            }) => {
                if *stale || fetched_at.elapsed() >= self.stale_after {
                    QueryState::Stale
                } else {
                    QueryState::Fresh
                }
            }
            Some(Slot::Failed { error }) => QueryState::Errored(error.clone()),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn downcast<T: Send + Sync + 'static>(value: CachedValue, key: &QueryKey) -> Result<Arc<T>> {
    value.downcast::<T>().map_err(|_| {
        Error::Decode(format!("cached value for {key} has an unexpected type"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn cache() -> QueryCache {
        QueryCache::default()
    }

    fn key(resource: &str, page: u32) -> QueryKey {
        QueryKey::new(resource, "list").param("page", page)
    }

    async fn counted(
        cache: &QueryCache,
        key: QueryKey,
        calls: &Arc<AtomicUsize>,
        value: u32,
    ) -> Result<Arc<u32>> {
        let calls = calls.clone();
        cache
            .fetch(key, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, Error>(value)
            })
            .await
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_load() {
        let cache = cache();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            counted(&cache, key("claims", 1), &calls, 7),
            counted(&cache, key("claims", 1), &calls, 8),
        );
        assert_eq!(*a.unwrap(), 7);
        assert_eq!(*b.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Fresh entry served without loading
        counted(&cache, key("claims", 1), &calls, 9).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.state(&key("claims", 1)).await, QueryState::Fresh);
    }

    #[tokio::test]
    async fn test_concurrent_waiters_share_error() {
        let cache = cache();
        let calls = Arc::new(AtomicUsize::new(0));

        let load = |calls: Arc<AtomicUsize>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Err::<u32, _>(Error::HttpStatus {
                    code: 500,
                    message: None,
                })
            }
        };
        let (a, b) = tokio::join!(
            cache.fetch(key("drugs", 1), load(calls.clone())),
            cache.fetch(key("drugs", 1), load(calls.clone())),
        );
        assert_eq!(a.unwrap_err().status(), Some(500));
        assert_eq!(b.unwrap_err().status(), Some(500));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_cached_until_refetch() {
        let cache = cache();
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = |calls: Arc<AtomicUsize>| {
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(Error::Network("connection refused".to_string()))
            }
        };

        assert!(cache.fetch(key("members", 1), failing(calls.clone())).await.is_err());
        let again = cache.fetch(key("members", 1), failing(calls.clone())).await;
        assert_eq!(again.unwrap_err(), Error::Network("connection refused".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            cache.state(&key("members", 1)).await,
            QueryState::Errored(Error::Network(_))
        ));

        let value = cache
            .refetch(key("members", 1), || async { Ok::<_, Error>(3u32) })
            .await
            .unwrap();
        assert_eq!(*value, 3);
        assert_eq!(cache.state(&key("members", 1)).await, QueryState::Fresh);
    }

    #[tokio::test]
    async fn test_invalidate_marks_partition_stale() {
        let cache = cache();
        let calls = Arc::new(AtomicUsize::new(0));

        counted(&cache, key("claims", 1), &calls, 1).await.unwrap();
        counted(&cache, key("claims", 2), &calls, 2).await.unwrap();
        counted(&cache, key("drugs", 1), &calls, 3).await.unwrap();
        cache
            .fetch(key("claims", 3), || async {
                Err::<u32, _>(Error::Network("down".to_string()))
            })
            .await
            .unwrap_err();

        assert_eq!(cache.invalidate("claims").await, 3);
        assert_eq!(cache.state(&key("claims", 1)).await, QueryState::Stale);
        assert_eq!(cache.state(&key("claims", 3)).await, QueryState::Idle);
        assert_eq!(cache.state(&key("drugs", 1)).await, QueryState::Fresh);

        let reloaded = counted(&cache, key("claims", 1), &calls, 10).await.unwrap();
        assert_eq!(*reloaded, 10);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_fetch_completing_after_invalidation_is_stale() {
        let cache = cache();
        let (release, gate) = oneshot::channel::<()>();

        let pending = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .fetch(key("claims", 1), move || async move {
                        gate.await
                            .map_err(|_| Error::Network("gate dropped".to_string()))?;
                        Ok::<_, Error>(1u32)
                    })
                    .await
            })
        };

        while cache.state(&key("claims", 1)).await != QueryState::Fetching {
            tokio::task::yield_now().await;
        }
        cache.invalidate("claims").await;
        release.send(()).unwrap();

        assert_eq!(*pending.await.unwrap().unwrap(), 1);
        assert_eq!(cache.state(&key("claims", 1)).await, QueryState::Stale);
    }

    #[tokio::test]
    async fn test_read_after_invalidation_does_not_join_older_fetch() {
        let cache = cache();
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();

        let before_write = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .fetch(key("claims", 1), move || async move {
                        gate.await
                            .map_err(|_| Error::Network("gate dropped".to_string()))?;
                        Ok::<_, Error>("pre-mutation".to_string())
                    })
                    .await
            })
        };

        while cache.state(&key("claims", 1)).await != QueryState::Fetching {
            tokio::task::yield_now().await;
        }
        cache.invalidate("claims").await;

        let after_write = {
            let calls = calls.clone();
            cache
                .fetch(key("claims", 1), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Error>("post-mutation".to_string())
                })
                .await
                .unwrap()
        };
        assert_eq!(after_write.as_str(), "post-mutation");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The older fetch still resolves for its own caller but does not
        // overwrite the newer entry
        release.send(()).unwrap();
        assert_eq!(before_write.await.unwrap().unwrap().as_str(), "pre-mutation");
        assert_eq!(cache.state(&key("claims", 1)).await, QueryState::Fresh);

        let cached: Arc<String> = cache
            .fetch(key("claims", 1), || async {
                Ok::<_, Error>("unexpected".to_string())
            })
            .await
            .unwrap();
        assert_eq!(cached.as_str(), "post-mutation");
    }

    #[tokio::test]
    async fn test_insert_replaces_entry_with_fresh_value() {
        let cache = cache();
        let calls = Arc::new(AtomicUsize::new(0));

        counted(&cache, key("members", 1), &calls, 1).await.unwrap();
        cache.invalidate("members").await;
        cache.insert(key("members", 1), 5u32).await;

        assert_eq!(cache.state(&key("members", 1)).await, QueryState::Fresh);
        let value = counted(&cache, key("members", 1), &calls, 9).await.unwrap();
        assert_eq!(*value, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recent() {
        let cache = QueryCache::new(&CacheConfig {
            max_entries: 2,
            ..Default::default()
        });
        let calls = Arc::new(AtomicUsize::new(0));

        counted(&cache, key("claims", 1), &calls, 1).await.unwrap();
        counted(&cache, key("claims", 2), &calls, 2).await.unwrap();
        counted(&cache, key("claims", 3), &calls, 3).await.unwrap();

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.state(&key("claims", 1)).await, QueryState::Idle);
        assert_eq!(cache.state(&key("claims", 3)).await, QueryState::Fresh);
    }

    #[tokio::test]
    async fn test_zero_stale_after_always_reloads() {
        let cache = QueryCache::new(&CacheConfig {
            stale_after_seconds: 0,
            ..Default::default()
        });
        let calls = Arc::new(AtomicUsize::new(0));

        counted(&cache, key("analytics", 1), &calls, 1).await.unwrap();
        assert_eq!(cache.state(&key("analytics", 1)).await, QueryState::Stale);
        counted(&cache, key("analytics", 1), &calls, 2).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_decode_error() {
        let cache = cache();
        cache
            .fetch(key("drugs", 1), || async { Ok::<_, Error>(1u32) })
            .await
            .unwrap();

        let err = cache
            .fetch(key("drugs", 1), || async { Ok::<_, Error>(String::new()) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_clear_and_invalidate_key() {
        let cache = cache();
        let calls = Arc::new(AtomicUsize::new(0));

        counted(&cache, key("pharmacies", 1), &calls, 1).await.unwrap();
        counted(&cache, key("pharmacies", 2), &calls, 2).await.unwrap();

        cache.invalidate_key(&key("pharmacies", 2)).await;
        assert_eq!(cache.state(&key("pharmacies", 1)).await, QueryState::Fresh);
        assert_eq!(cache.state(&key("pharmacies", 2)).await, QueryState::Stale);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
