use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::{join_all, BoxFuture};
use tracing::Instrument;

use super::batch::{Batch, Phase};
use super::cache::HashMapCache;
use super::factory::CacheFactory;
use super::loader::{BatchResult, Loader};
use super::storage::CacheStorage;
use super::thunk::Thunk;
use super::Error;

/// Default time a batch collects keys before it is sent to the loader.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1);

/// Default maximum number of keys per batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Data loader.
///
/// Collects the keys requested within `delay` (or until `max_batch_size`
/// keys are collected) and resolves them with a single call to the
/// [Loader]. Successful values are cached for the lifetime of the data
/// loader, which is meant to be a single request.
///
/// Operations that may open a batch spawn Tokio tasks and must be called
/// from within a Tokio runtime.
///
/// Reference: <https://github.com/facebook/dataloader>
pub struct DataLoader<K, L, C = HashMapCache>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
    C: CacheFactory<K, L::Value>,
{
    inner: Arc<DataLoaderInner<K, L, C::Storage>>,
    delay: Duration,
    max_batch_size: usize,
}

struct DataLoaderInner<K, L, S>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
{
    requests: Mutex<Requests<K, L::Value, L::Error, S>>,
    loader: L,
}

/// State shared by all callers, always updated under one lock.
struct Requests<K, V, E, S> {
    cache: S,
    current: Option<Batch<K, V, E>>,
    next_batch: u64,
}

/// What closed a batch.
#[derive(Clone, Copy, Debug)]
enum Trigger {
    Delay,
    MaxBatchSize,
}

impl Trigger {
    fn as_str(&self) -> &'static str {
        match self {
            Trigger::Delay => "delay",
            Trigger::MaxBatchSize => "max_batch_size",
        }
    }
}

impl<K, L> DataLoader<K, L, HashMapCache>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
{
    /// Use `Loader` to create a [DataLoader] that caches values in a
    /// `HashMap`.
    pub fn new(loader: L) -> Self {
        Self::with_cache(loader, HashMapCache::default())
    }
}

impl<K, L, C> DataLoader<K, L, C>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
    C: CacheFactory<K, L::Value>,
{
    /// Use `Loader` to create a [DataLoader] with a cache factory.
    pub fn with_cache(loader: L, cache_factory: C) -> Self {
        let requests = Requests { cache: cache_factory.create(), current: None, next_batch: 0 };
        Self {
            inner: Arc::new(DataLoaderInner { requests: Mutex::new(requests), loader }),
            delay: DEFAULT_DELAY,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Specify the delay time for loading data, the default is `1ms`.
    #[must_use]
    pub fn delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    /// Specify the max batch size for loading data, the default is `100`.
    /// `0` means batches are only bounded by the delay.
    ///
    /// If the keys waiting to be loaded reach the threshold, they are loaded
    /// immediately.
    #[must_use]
    pub fn max_batch_size(self, max_batch_size: usize) -> Self {
        Self { max_batch_size, ..self }
    }

    /// Get the loader.
    #[inline]
    pub fn loader(&self) -> &L {
        &self.inner.loader
    }

    /// Use this `DataLoader` to load a value.
    pub async fn load(&self, key: K) -> Result<L::Value, Error<L::Error>> {
        self.load_thunk(key).await
    }

    /// Registers `key` right away and returns a [Thunk] that resolves once
    /// its batch has been loaded.
    pub fn load_thunk(&self, key: K) -> Thunk<L::Value, L::Error> {
        let mut guard = self.inner.requests();
        let requests = &mut *guard;

        if let Some(value) = requests.cache.get(&key) {
            tracing::trace!("cache hit");
            return Thunk::ready(value.clone());
        }

        let next_batch = &mut requests.next_batch;
        let batch = requests.current.get_or_insert_with(|| {
            let id = *next_batch;
            *next_batch += 1;
            tracing::trace!(batch.id = id, "opening batch");
            Batch::new(id)
        });

        let seat = batch.join(key);

        if seat.opened {
            let timer = tokio::spawn(self.inner.clone().expire(batch.id(), self.delay));
            batch.set_timer(timer.abort_handle());
        }

        if self.max_batch_size > 0 && batch.len() >= self.max_batch_size {
            if let Some(mut batch) = requests.current.take() {
                batch.close();
                batch.stop_timer();
                tokio::spawn(self.inner.clone().dispatch(batch, Trigger::MaxBatchSize));
            }
        }

        Thunk::pending(seat.position, seat.rx)
    }

    /// Use this `DataLoader` to load many values. The results are
    /// positional with `keys`.
    pub async fn load_many<I>(&self, keys: I) -> Vec<Result<L::Value, Error<L::Error>>>
    where
        I: IntoIterator<Item = K>,
    {
        self.load_many_thunk(keys).await
    }

    /// Registers all `keys` right away and returns a future of the
    /// positional results.
    pub fn load_many_thunk<I>(
        &self,
        keys: I,
    ) -> BoxFuture<'static, Vec<Result<L::Value, Error<L::Error>>>>
    where
        I: IntoIterator<Item = K>,
    {
        let thunks: Vec<_> = keys.into_iter().map(|key| self.load_thunk(key)).collect();
        Box::pin(join_all(thunks.into_iter().map(Thunk::resolve)))
    }

    /// Seeds the cache with a value obtained elsewhere. Returns `false`,
    /// leaving the cache untouched, if `key` is already cached.
    ///
    /// **NOTE: If the cache type is [NoCache](super::NoCache), nothing is
    /// stored and this returns `false`.**
    pub fn prime(&self, key: K, value: L::Value) -> bool {
        self.inner.requests().cache.insert(key, value)
    }

    /// Primes many values, returns how many of them were stored.
    pub fn prime_many<I>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = (K, L::Value)>,
    {
        let mut requests = self.inner.requests();
        let mut primed = 0;
        for (key, value) in values {
            if requests.cache.insert(key, value) {
                primed += 1;
            }
        }
        primed
    }

    /// Removes `key` from the cache. A batch already loading `key` is not
    /// affected.
    pub fn clear(&self, key: &K) {
        self.inner.requests().cache.remove(key);
    }

    /// Clears the cache.
    pub fn clear_all(&self) {
        self.inner.requests().cache.clear();
    }

    /// Gets all values in the cache.
    pub fn get_cached_values(&self) -> HashMap<K, L::Value> {
        self.inner
            .requests()
            .cache
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K, L, C> Clone for DataLoader<K, L, C>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
    C: CacheFactory<K, L::Value>,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            delay: self.delay,
            max_batch_size: self.max_batch_size,
        }
    }
}

impl<K, L, S> DataLoaderInner<K, L, S>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: Loader<K>,
    S: CacheStorage<Key = K, Value = L::Value>,
{
    fn requests(&self) -> MutexGuard<'_, Requests<K, L::Value, L::Error, S>> {
        // the state is consistent between statements, a poisoned lock is safe to reuse
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Closes the batch `id` once `delay` has passed, unless the batch was
    /// already closed because it got full.
    async fn expire(self: Arc<Self>, id: u64, delay: Duration) {
        tokio::time::sleep(delay).await;

        let batch = {
            let mut requests = self.requests();
            match requests.current.as_ref() {
                Some(batch) if batch.id() == id => requests.current.take(),
                _ => None,
            }
        };

        match batch {
            Some(mut batch) => {
                batch.close();
                self.dispatch(batch, Trigger::Delay).await;
            }
            None => tracing::trace!(batch.id = id, "batch already dispatched"),
        }
    }

    async fn dispatch(self: Arc<Self>, mut batch: Batch<K, L::Value, L::Error>, trigger: Trigger) {
        let span = tracing::debug_span!(
            "batch_load",
            batch.id = batch.id(),
            batch.size = batch.len(),
            trigger = trigger.as_str()
        );

        debug_assert_eq!(batch.phase(), Phase::Closing, "dispatched a batch that is not closing");
        let result = self.loader.load(batch.keys()).instrument(span.clone()).await;

        let _enter = span.enter();
        self.cache_values(batch.keys(), &result);
        batch.complete(Arc::new(result));
    }

    /// Caches every successful value of a batch.
    fn cache_values(&self, keys: &[K], result: &BatchResult<L::Value, L::Error>) {
        let values = match result {
            Ok(values) => values,
            Err(_) => {
                tracing::debug!("batch failed");
                return;
            }
        };

        if values.len() != keys.len() {
            tracing::warn!(
                keys = keys.len(),
                outcomes = values.len(),
                "loader returned a misaligned batch"
            );
        }

        let mut requests = self.requests();
        for (key, value) in keys.iter().zip(values) {
            if let Ok(value) = value {
                requests.cache.insert(key.clone(), value.clone());
            }
        }
    }
}
