use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::{EntityTag, QueryKey};
use crate::error::{ErrorKind, Result};
use crate::util::unix_timestamp_now;

/// Last failure of a read, kept for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Point-in-time view of one cached read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySnapshot<T> {
    pub data: Option<T>,
    /// No data and no error yet.
    pub is_pending: bool,
    pub is_fetching: bool,
    pub is_stale: bool,
    pub error: Option<QueryError>,
    /// Unix time of the last successful fetch
    pub fetched_at: Option<i64>,
}

impl<T> QuerySnapshot<T> {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Default)]
struct CacheEntry {
    value: Option<Arc<dyn Any + Send + Sync>>,
    stale: bool,
    fetched_at: Option<i64>,
    in_flight: usize,
    error: Option<QueryError>,
}

struct TagChannel {
    generation: watch::Sender<u64>,
    pending_mutations: AtomicUsize,
}

impl TagChannel {
    fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            generation,
            pending_mutations: AtomicUsize::new(0),
        }
    }
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    tags: [TagChannel; 2],
}

/// Shared, cloneable query cache.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.entries().len())
            .field("bookmarks_generation", &self.generation(EntityTag::Bookmarks))
            .field("notes_generation", &self.generation(EntityTag::Notes))
            .finish()
    }
}

/// Marks a fetch of `key` as in flight until dropped, so a cancelled fetch
/// does not leave the entry fetching.
struct InFlightGuard<'a> {
    client: &'a QueryClient,
    key: &'a QueryKey,
}

impl<'a> InFlightGuard<'a> {
    fn start(client: &'a QueryClient, key: &'a QueryKey) -> Self {
        client.entries().entry(key.clone()).or_default().in_flight += 1;
        Self { client, key }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(entry) = self.client.entries().get_mut(self.key) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
        }
    }
}

/// Decrements a tag's pending-mutation count when the mutation ends,
/// including when its future is dropped.
struct PendingGuard<'a>(&'a AtomicUsize);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl QueryClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                tags: [TagChannel::new(), TagChannel::new()],
            }),
        }
    }

    /// Return the cached value for `key` when it is fresh, else run `fetcher`
    /// and cache its result.
    ///
    /// A result whose tag was invalidated while the fetch was in flight is
    /// stored stale, so the next read refetches. A failed fetch keeps any
    /// previous value.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.fresh::<T>(&key) {
            return Ok(value);
        }

        let started_generation = self.generation(key.tag);
        let in_flight = InFlightGuard::start(self, &key);
        let result = fetcher().await;
        drop(in_flight);

        let invalidated = self.generation(key.tag) != started_generation;
        let mut entries = self.entries();
        let entry = entries.entry(key.clone()).or_default();
        match result {
            Ok(value) => {
                entry.value = Some(Arc::new(value.clone()));
                entry.stale = invalidated;
                entry.fetched_at = Some(unix_timestamp_now());
                entry.error = None;
                drop(entries);
                tracing::debug!(%key, invalidated, "Query fetched");
                Ok(value)
            }
            Err(error) => {
                entry.error = Some(QueryError {
                    kind: error.kind(),
                    message: error.to_string(),
                });
                drop(entries);
                tracing::warn!(%key, "Query failed: {}", error);
                Err(error)
            }
        }
    }

    /// Cached value for `key`, fresh or stale.
    #[must_use]
    pub fn cached<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries()
            .get(key)
            .and_then(|entry| entry.value.as_ref())
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Whether `key` must be refetched before use.
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries()
            .get(key)
            .map_or(true, |entry| entry.stale || entry.value.is_none())
    }

    #[must_use]
    pub fn snapshot<T: Clone + 'static>(&self, key: &QueryKey) -> QuerySnapshot<T> {
        let entries = self.entries();
        let Some(entry) = entries.get(key) else {
            return QuerySnapshot {
                data: None,
                is_pending: true,
                is_fetching: false,
                is_stale: true,
                error: None,
                fetched_at: None,
            };
        };
        let data = entry
            .value
            .as_ref()
            .and_then(|value| value.downcast_ref::<T>())
            .cloned();
        QuerySnapshot {
            is_pending: data.is_none() && entry.error.is_none(),
            is_fetching: entry.in_flight > 0,
            is_stale: entry.stale || data.is_none(),
            error: entry.error.clone(),
            fetched_at: entry.fetched_at,
            data,
        }
    }

    /// Mark every entry under `tag` stale and notify observers.
    pub fn invalidate(&self, tag: EntityTag) {
        let marked = {
            let mut entries = self.entries();
            let mut marked = 0_usize;
            for (key, entry) in entries.iter_mut() {
                if key.tag == tag {
                    entry.stale = true;
                    marked += 1;
                }
            }
            marked
        };
        self.channel(tag)
            .generation
            .send_modify(|generation| *generation += 1);
        tracing::debug!(%tag, marked, "Invalidated queries");
    }

    /// Number of invalidations `tag` has seen.
    #[must_use]
    pub fn generation(&self, tag: EntityTag) -> u64 {
        *self.channel(tag).generation.borrow()
    }

    /// Receiver that changes on every invalidation of `tag`.
    #[must_use]
    pub fn subscribe(&self, tag: EntityTag) -> watch::Receiver<u64> {
        self.channel(tag).generation.subscribe()
    }

    #[must_use]
    pub fn observe(&self, key: QueryKey) -> QueryObserver {
        QueryObserver {
            rx: self.subscribe(key.tag),
            key,
        }
    }

    /// Run a write. Its tag is invalidated only if it succeeds.
    pub async fn mutate<T, Fut>(&self, tag: EntityTag, mutation: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let result = {
            let pending = &self.channel(tag).pending_mutations;
            pending.fetch_add(1, Ordering::SeqCst);
            let _guard = PendingGuard(pending);
            mutation.await
        };

        match &result {
            Ok(_) => self.invalidate(tag),
            Err(error) => tracing::warn!(%tag, "Mutation failed: {}", error),
        }
        result
    }

    /// Writes currently in flight for `tag`.
    #[must_use]
    pub fn pending_mutations(&self, tag: EntityTag) -> usize {
        self.channel(tag).pending_mutations.load(Ordering::SeqCst)
    }

    fn fresh<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries()
            .get(key)
            .filter(|entry| !entry.stale)
            .and_then(|entry| entry.value.as_ref())
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    fn channel(&self, tag: EntityTag) -> &TagChannel {
        &self.inner.tags[tag.index()]
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Follows invalidations of one read.
pub struct QueryObserver {
    key: QueryKey,
    rx: watch::Receiver<u64>,
}

impl QueryObserver {
    #[must_use]
    pub const fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Wait for the next invalidation of this read's tag.
    ///
    /// Returns `false` once the client is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
