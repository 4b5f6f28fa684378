use std::future::Future;
use std::hash::Hash;
use std::marker::PhantomData;

use super::DataLoader;
use crate::core::config::Batch;

/// Result of loading one batch of keys.
///
/// `Err` fails every key of the batch. `Ok` carries one outcome per key,
/// aligned positionally with the keys that were passed to
/// [Loader::load].
pub type BatchResult<V, E> = Result<Vec<Result<V, E>>, E>;

/// Trait for batch loading.
#[async_trait::async_trait]
pub trait Loader<K: Send + Sync + Hash + Eq + Clone + 'static>: Send + Sync + 'static {
    /// type of value.
    type Value: Send + Sync + Clone + 'static;

    /// Type of error.
    type Error: Send + Sync + Clone + 'static;

    /// Load the data set specified by the `keys`.
    ///
    /// `keys` are distinct and in the order they were first requested. The
    /// returned outcomes must follow the same order, one per key.
    async fn load(&self, keys: &[K]) -> BatchResult<Self::Value, Self::Error>;

    /// Wraps this loader into a [DataLoader] configured by `batch`.
    fn into_data_loader(self, batch: &Batch) -> DataLoader<K, Self>
    where
        Self: Sized,
    {
        DataLoader::new(self)
            .delay(batch.wait())
            .max_batch_size(batch.max_size)
    }
}

/// A [Loader] backed by an async closure, see [load_fn].
pub struct LoadFn<K, F> {
    f: F,
    _key: PhantomData<fn(K)>,
}

/// Turns an async closure receiving the keys of a batch into a [Loader].
pub fn load_fn<K, F>(f: F) -> LoadFn<K, F> {
    LoadFn { f, _key: PhantomData }
}

#[async_trait::async_trait]
impl<K, F, Fut, V, E> Loader<K> for LoadFn<K, F>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    F: Fn(Vec<K>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = BatchResult<V, E>> + Send + 'static,
    V: Send + Sync + Clone + 'static,
    E: Send + Sync + Clone + 'static,
{
    type Value = V;
    type Error = E;

    async fn load(&self, keys: &[K]) -> BatchResult<V, E> {
        (self.f)(keys.to_vec()).await
    }
}
