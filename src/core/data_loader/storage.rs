use std::hash::Hash;

/// Cache storage for [DataLoader](super::DataLoader).
///
/// Entries are written once per key by the loader; an entry only changes
/// after it was removed with [CacheStorage::remove] or [CacheStorage::clear].
pub trait CacheStorage: Send + Sync + 'static {
    /// The key type of the record.
    type Key: Send + Sync + Clone + Eq + Hash + 'static;

    /// The value type of the record.
    type Value: Send + Sync + Clone + 'static;

    /// Returns a reference to the value of the key in the cache or None if it
    /// is not present in the cache.
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Puts a key-value pair into the cache unless the key is already
    /// present. Returns `true` if the pair was stored.
    fn insert(&mut self, key: Self::Key, val: Self::Value) -> bool;

    /// Removes the value corresponding to the key from the cache.
    fn remove(&mut self, key: &Self::Key);

    /// Clears the cache, removing all key-value pairs.
    fn clear(&mut self);

    /// Returns an iterator over the key-value pairs in the cache.
    fn iter(&self) -> Box<dyn Iterator<Item = (&'_ Self::Key, &'_ Self::Value)> + '_>;
}
