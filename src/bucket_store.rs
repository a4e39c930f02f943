//! BucketStore: fixed-length array of chains; collisions resolve by
//! linear scan of one chain.
//!
//! The store never changes its bucket count. Growth builds a new store and
//! moves entries across (see `resize`).

use crate::hash::index_for_hash;
use core::borrow::Borrow;
use std::collections::TryReserveError;

#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    // Raw accumulator; bucket indices are derived from it on every rehash.
    pub(crate) hash: i32,
}

/// Outcome of `insert_or_update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Upsert {
    Created,
    Updated,
}

#[derive(Clone, Debug)]
pub(crate) struct BucketStore<K, V> {
    chains: Vec<Vec<Entry<K, V>>>,
}

impl<K, V> BucketStore<K, V> {
    pub(crate) fn with_buckets(buckets: usize) -> Self {
        let mut chains = Vec::with_capacity(buckets);
        chains.resize_with(buckets, Vec::new);
        Self { chains }
    }

    /// Like `with_buckets`, but reports allocation failure instead of
    /// aborting. Empty chains do not allocate, so only the outer array can
    /// fail here.
    pub(crate) fn try_with_buckets(buckets: usize) -> Result<Self, TryReserveError> {
        let mut chains = Vec::new();
        chains.try_reserve_exact(buckets)?;
        chains.resize_with(buckets, Vec::new);
        Ok(Self { chains })
    }

    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        self.chains.len()
    }

    #[inline]
    pub(crate) fn index_of(&self, hash: i32) -> usize {
        index_for_hash(hash, self.chains.len())
    }

    /// Total number of entries across all chains.
    pub(crate) fn len(&self) -> usize {
        self.chains.iter().map(Vec::len).sum()
    }

    pub(crate) fn chain_len(&self, index: usize) -> usize {
        self.chains[index].len()
    }

    pub(crate) fn find<Q>(&self, index: usize, hash: i32, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.chains[index]
            .iter()
            .find(|e| e.hash == hash && e.key.borrow() == key)
    }

    pub(crate) fn find_mut<Q>(
        &mut self,
        index: usize,
        hash: i32,
        key: &Q,
    ) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.chains[index]
            .iter_mut()
            .find(|e| e.hash == hash && e.key.borrow() == key)
    }

    /// Overwrite the value of an existing entry in place (its stored key is
    /// kept), or append a new entry at the chain's tail.
    pub(crate) fn insert_or_update(&mut self, index: usize, hash: i32, key: K, value: V) -> Upsert
    where
        K: Eq,
    {
        let chain = &mut self.chains[index];
        if let Some(entry) = chain.iter_mut().find(|e| e.hash == hash && e.key == key) {
            entry.value = value;
            return Upsert::Updated;
        }
        chain.push(Entry { key, value, hash });
        Upsert::Created
    }

    /// Remove the matching entry; later entries in the chain shift down.
    pub(crate) fn remove_from_chain<Q>(
        &mut self,
        index: usize,
        hash: i32,
        key: &Q,
    ) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let chain = &mut self.chains[index];
        let pos = chain
            .iter()
            .position(|e| e.hash == hash && e.key.borrow() == key)?;
        Some(chain.remove(pos))
    }

    /// Withdraw the entry most recently appended to `index`.
    pub(crate) fn pop_back(&mut self, index: usize) -> Option<Entry<K, V>> {
        self.chains[index].pop()
    }

    /// Append without a duplicate scan. Caller guarantees the key is absent
    /// and the chain has spare capacity reserved.
    pub(crate) fn append(&mut self, entry: Entry<K, V>) {
        let index = self.index_of(entry.hash);
        self.chains[index].push(entry);
    }

    /// Reserve exactly enough room in each chain to take the given hashes,
    /// so that subsequent `append`s cannot allocate.
    pub(crate) fn try_reserve_for<I>(&mut self, hashes: I) -> Result<(), TryReserveError>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut wanted: Vec<usize> = Vec::new();
        wanted.try_reserve_exact(self.chains.len())?;
        wanted.resize(self.chains.len(), 0);
        for hash in hashes {
            wanted[self.index_of(hash)] += 1;
        }
        for (chain, extra) in self.chains.iter_mut().zip(wanted) {
            if extra > 0 {
                chain.try_reserve_exact(extra)?;
            }
        }
        Ok(())
    }

    pub(crate) fn hashes(&self) -> impl Iterator<Item = i32> + '_ {
        self.chains.iter().flat_map(|c| c.iter().map(|e| e.hash))
    }

    /// Consume the store, yielding entries bucket 0 first, chain order
    /// within each bucket.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = Entry<K, V>> {
        self.chains.into_iter().flatten()
    }

    pub(crate) fn chains(&self) -> &[Vec<Entry<K, V>>] {
        &self.chains
    }

    pub(crate) fn chains_mut(&mut self) -> &mut [Vec<Entry<K, V>>] {
        &mut self.chains
    }

    pub(crate) fn clear(&mut self) {
        for chain in &mut self.chains {
            chain.clear();
        }
    }
}
