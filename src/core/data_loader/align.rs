//! Helpers for [Loader](super::Loader) implementations.
//!
//! Databases return the rows of an `IN (...)` query in whatever order they
//! like and skip keys that match nothing. A loader has to hand back exactly
//! one outcome per requested key, in request order; these helpers do that
//! realignment.

use std::collections::HashMap;
use std::hash::Hash;

/// Aligns rows of a one-to-one relation to `keys`.
///
/// A key without a row maps to `Ok(None)`. If several rows share a key the
/// first one wins.
pub fn align_by_key<K, V, E, I>(keys: &[K], rows: I) -> Vec<Result<Option<V>, E>>
where
    K: Hash + Eq,
    V: Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let mut by_key = HashMap::new();
    for (key, value) in rows {
        by_key.entry(key).or_insert(value);
    }

    keys.iter().map(|key| Ok(by_key.get(key).cloned())).collect()
}

/// Groups rows of a one-to-many relation by key and aligns the groups to
/// `keys`.
///
/// A key without rows maps to an empty `Vec`. Rows keep their relative
/// order inside a group.
pub fn group_by_key<K, V, E, I>(keys: &[K], rows: I) -> Vec<Result<Vec<V>, E>>
where
    K: Hash + Eq,
    V: Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let mut groups: HashMap<K, Vec<V>> = HashMap::new();
    for (key, value) in rows {
        groups.entry(key).or_default().push(value);
    }

    keys.iter()
        .map(|key| Ok(groups.get(key).cloned().unwrap_or_default()))
        .collect()
}
