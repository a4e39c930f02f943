//! HashTable: public get/put/remove surface over the bucket store.

use crate::bucket_store::{BucketStore, Entry, Upsert};
use crate::error::TableError;
use crate::hash::hash_key;
use crate::key::PrimitiveKey;
use crate::resize::{self, ResizePolicy, DEFAULT_CAPACITY};
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use core::slice;
use log::{debug, trace, warn};

const DEFAULT_BUCKETS: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CAPACITY) {
    Some(n) => n,
    None => panic!("default capacity must be positive"),
};

/// Separate-chaining hash table keyed by [`PrimitiveKey`]s.
///
/// Starts with 16 buckets (or the given capacity) and doubles whenever an
/// insertion pushes the entry count past three quarters of the bucket
/// count. Capacity never shrinks.
#[derive(Clone)]
pub struct HashTable<K, V> {
    store: BucketStore<K, V>,
    count: usize,
    policy: ResizePolicy,
}

impl<K, V> HashTable<K, V>
where
    K: PrimitiveKey,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUCKETS)
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            store: BucketStore::with_buckets(capacity.get()),
            count: 0,
            policy: ResizePolicy::new(),
        }
    }

    pub fn try_with_capacity(capacity: NonZeroUsize) -> Result<Self, TableError> {
        let store = BucketStore::try_with_buckets(capacity.get()).map_err(|source| {
            TableError::AllocFailed {
                buckets: capacity.get(),
                source,
            }
        })?;
        Ok(Self {
            store,
            count: 0,
            policy: ResizePolicy::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.store.bucket_count()
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PrimitiveKey,
    {
        let hash = hash_key(key);
        self.store
            .find(self.store.index_of(hash), hash, key)
            .map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PrimitiveKey,
    {
        let hash = hash_key(key);
        let index = self.store.index_of(hash);
        self.store.find_mut(index, hash, key).map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + PrimitiveKey,
    {
        self.get(key).is_some()
    }

    /// Insert or overwrite. An existing entry keeps its key and position;
    /// only its value is replaced.
    ///
    /// # Panics
    ///
    /// If growing the bucket store fails (capacity overflow or allocation
    /// failure). Use [`try_put`](Self::try_put) to handle that instead.
    pub fn put(&mut self, key: K, value: V) {
        if let Err(err) = self.try_put(key, value) {
            panic!("{err}");
        }
    }

    /// Like [`put`](Self::put), but a failed growth is returned as an error
    /// and the table is left exactly as it was before the call.
    pub fn try_put(&mut self, key: K, value: V) -> Result<(), TableError> {
        let hash = hash_key(&key);
        let index = self.store.index_of(hash);
        if self.store.insert_or_update(index, hash, key, value) == Upsert::Updated {
            return Ok(());
        }
        self.count += 1;
        trace!("new entry in bucket {index} (count {})", self.count);

        if self.policy.should_grow(self.count, self.capacity()) {
            if let Err(err) = self.grow() {
                warn!("hash table growth failed, withdrawing new entry: {err}");
                // The new entry is the tail of its chain in the old store.
                let _ = self.store.pop_back(index);
                self.count -= 1;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Remove `key`; `true` if an entry was removed.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + PrimitiveKey,
    {
        self.remove_entry(key).is_some()
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + PrimitiveKey,
    {
        let hash = hash_key(key);
        let index = self.store.index_of(hash);
        let entry = self.store.remove_from_chain(index, hash, key)?;
        self.count -= 1;
        Some((entry.key, entry.value))
    }

    /// Drop every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        self.store.clear();
        self.count = 0;
    }

    fn grow(&mut self) -> Result<(), TableError> {
        let old_capacity = self.capacity();
        let new_capacity = resize::rehash(&mut self.store, &self.policy)?;
        debug!(
            "grew hash table from {old_capacity} to {new_capacity} buckets ({} entries)",
            self.count
        );
        debug_assert_eq!(self.store.len(), self.count);
        Ok(())
    }

    /// Number of entries in bucket `index`.
    ///
    /// # Panics
    ///
    /// If `index >= self.capacity()`.
    pub fn bucket_len(&self, index: usize) -> usize {
        self.store.chain_len(index)
    }

    #[cfg(test)]
    pub(crate) fn store_len(&self) -> usize {
        self.store.len()
    }
}

impl<K, V> HashTable<K, V> {
    /// Entries in bucket order (bucket 0 first), chain order within a
    /// bucket. The order is an artifact of the layout, not a guarantee.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            chains: self.store.chains().iter(),
            chain: Default::default(),
            remaining: self.count,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            remaining: self.count,
            chains: self.store.chains_mut().iter_mut(),
            chain: Default::default(),
        }
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: PrimitiveKey,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for HashTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: PrimitiveKey,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: PrimitiveKey,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Iterator over immutable entries in `HashTable`.
pub struct Iter<'a, K, V> {
    chains: slice::Iter<'a, Vec<Entry<K, V>>>,
    chain: slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            self.chain = self.chains.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over mutable entries in `HashTable`.
pub struct IterMut<'a, K, V> {
    chains: slice::IterMut<'a, Vec<Entry<K, V>>>,
    chain: slice::IterMut<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                self.remaining -= 1;
                return Some((&e.key, &mut e.value));
            }
            self.chain = self.chains.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut HashTable<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
