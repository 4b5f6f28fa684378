use std::hash::Hash;

use super::storage::CacheStorage;

/// Creates the cache storage of a [DataLoader](super::DataLoader).
///
/// `create` runs once per data loader, and data loaders are built per
/// request by a [LoaderSet](crate::core::LoaderSet). Values cached by one
/// request are therefore never visible to another, and the factory itself
/// holds no entries.
pub trait CacheFactory<K, V>: Send + Sync + 'static
where
    K: Send + Sync + Clone + Eq + Hash + 'static,
    V: Send + Sync + Clone + 'static,
{
    type Storage: CacheStorage<Key = K, Value = V>;

    /// Create a cache storage.
    fn create(&self) -> Self::Storage;
}
