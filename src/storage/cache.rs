//! Memoization store for loaded entities.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Maps a resource key to the shared, loaded entity.
///
/// No eviction. Not synchronized: concurrent loads of one uncached key through
/// separate caches may both fetch, and the last `put` wins.
#[derive(Debug)]
pub struct EntityCache<K, V> {
    entries: HashMap<K, Arc<V>>,
}

impl<K, V> Default for EntityCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> EntityCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached entity for `key`, sharing the stored instance.
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).cloned()
    }

    /// Store `value` under `key`, replacing any earlier entry.
    pub fn put(&mut self, key: K, value: Arc<V>) -> Arc<V> {
        self.entries.insert(key, Arc::clone(&value));
        value
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &Arc<V>> {
        self.entries.values()
    }
}
